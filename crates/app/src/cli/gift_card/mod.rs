use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct GiftCardCommand {
    #[command(subcommand)]
    command: GiftCardSubcommand,
}

#[derive(Debug, Subcommand)]
enum GiftCardSubcommand {
    Create(create::CreateGiftCardArgs),
}

pub(crate) async fn run(command: GiftCardCommand) -> Result<(), String> {
    match command.command {
        GiftCardSubcommand::Create(args) => create::run(args).await,
    }
}
