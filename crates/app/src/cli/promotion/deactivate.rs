use clap::Args;
use sillage_app::{
    database::{self, Db},
    domain::promotions::{PgPromotionsService, PromotionsService},
};

#[derive(Debug, Args)]
pub(crate) struct DeactivatePromotionArgs {
    #[arg(long)]
    code: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: DeactivatePromotionArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    PgPromotionsService::new(Db::new(pool))
        .deactivate_promotion(&args.code)
        .await
        .map_err(|error| format!("failed to deactivate promotion: {error}"))?;

    println!("deactivated promotion: {}", args.code.trim().to_ascii_uppercase());

    Ok(())
}
