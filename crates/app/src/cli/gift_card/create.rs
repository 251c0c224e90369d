use clap::Args;
use sillage::prelude::Price;
use sillage_app::{
    database::{self, Db},
    domain::promotions::{PgPromotionsService, PromotionsService, data::NewGiftCard},
};

use crate::cli::parse_timestamp;

#[derive(Debug, Args)]
pub(crate) struct CreateGiftCardArgs {
    #[arg(long)]
    code: String,

    /// Opening balance in minor units
    #[arg(long)]
    balance: u64,

    /// Optional expiry (RFC 3339)
    #[arg(long)]
    expires_at: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateGiftCardArgs) -> Result<(), String> {
    let expires_at = parse_timestamp("expires-at", args.expires_at.as_deref())?;

    if let Some(expires_at) = expires_at.as_ref()
        && *expires_at <= jiff::Timestamp::now()
    {
        return Err("expires-at must be in the future".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let gift_card = PgPromotionsService::new(Db::new(pool))
        .create_gift_card(NewGiftCard {
            code: args.code,
            balance: Price::new(args.balance),
            expires_at,
        })
        .await
        .map_err(|error| format!("failed to create gift card: {error}"))?;

    println!("gift_card_code: {}", gift_card.code);
    println!("gift_card_balance: {}", gift_card.balance);

    Ok(())
}
