use clap::{Args, Subcommand};

mod create;
mod token;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(create::CreateUserArgs),
    Token(token::IssueTokenArgs),
    RevokeToken(token::RevokeTokenArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::Token(args) => token::issue(args).await,
        UserSubcommand::RevokeToken(args) => token::revoke(args).await,
    }
}
