use clap::{Args, Subcommand};

mod create;
mod deactivate;

#[derive(Debug, Args)]
pub(crate) struct PromotionCommand {
    #[command(subcommand)]
    command: PromotionSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionSubcommand {
    Create(create::CreatePromotionArgs),
    Deactivate(deactivate::DeactivatePromotionArgs),
}

pub(crate) async fn run(command: PromotionCommand) -> Result<(), String> {
    match command.command {
        PromotionSubcommand::Create(args) => create::run(args).await,
        PromotionSubcommand::Deactivate(args) => deactivate::run(args).await,
    }
}
