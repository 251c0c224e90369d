use clap::Args;
use sillage_app::{
    auth::PgAuthService,
    database,
    domain::users::{PgUsersService, UsersService, data::NewUser, records::UserUuid},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Contact email for the new account
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Skip issuing a bearer token for the new user
    #[arg(long)]
    no_token: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(pool.clone())
        .create_user(NewUser {
            uuid: UserUuid::new(),
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);

    if args.no_token {
        return Ok(());
    }

    let issued = PgAuthService::new(pool)
        .issue_user_token(user.uuid)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
