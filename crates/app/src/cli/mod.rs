use clap::{Parser, Subcommand};

mod catalog;
mod gift_card;
mod promotion;
mod user;

#[derive(Debug, Parser)]
#[command(name = "sillage-app", about = "Sillage storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Catalog(catalog::CatalogCommand),
    Promotion(promotion::PromotionCommand),
    GiftCard(gift_card::GiftCardCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Catalog(command) => catalog::run(command).await,
            Commands::Promotion(command) => promotion::run(command).await,
            Commands::GiftCard(command) => gift_card::run(command).await,
        }
    }
}

fn parse_timestamp(flag: &str, raw: Option<&str>) -> Result<Option<jiff::Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<jiff::Timestamp>()
            .map_err(|error| format!("invalid {flag} timestamp: {error}"))
    })
    .transpose()
}
