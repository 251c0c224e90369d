use clap::{Args, ValueEnum};
use sillage::prelude::{Price, PromotionKind};
use sillage_app::{
    database::{self, Db},
    domain::promotions::{PgPromotionsService, PromotionsService, data::NewPromotion},
};

use crate::cli::parse_timestamp;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Percentage,
    FixedAmount,
    FreeShipping,
}

#[derive(Debug, Args)]
pub(crate) struct CreatePromotionArgs {
    /// Code shoppers type at checkout
    #[arg(long)]
    code: String,

    #[arg(long, value_enum)]
    kind: KindArg,

    /// Basis points for percentage codes, minor units for fixed amounts
    #[arg(long, default_value_t = 0)]
    value: u64,

    /// Minimum subtotal in minor units
    #[arg(long, default_value_t = 0)]
    minimum_subtotal: u64,

    /// Start of the redemption window (RFC 3339); defaults to now
    #[arg(long)]
    starts_at: Option<String>,

    /// End of the redemption window (RFC 3339)
    #[arg(long)]
    ends_at: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreatePromotionArgs) -> Result<(), String> {
    let kind = match args.kind {
        KindArg::Percentage => PromotionKind::Percentage(
            u32::try_from(args.value).map_err(|_| "percentage value is out of range".to_string())?,
        ),
        KindArg::FixedAmount => PromotionKind::FixedAmount(Price::new(args.value)),
        KindArg::FreeShipping => PromotionKind::FreeShipping,
    };

    let starts_at = parse_timestamp("starts-at", args.starts_at.as_deref())?;
    let ends_at = parse_timestamp("ends-at", args.ends_at.as_deref())?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let promotion = PgPromotionsService::new(Db::new(pool))
        .create_promotion(NewPromotion {
            code: args.code,
            kind,
            minimum_subtotal: Price::new(args.minimum_subtotal),
            starts_at,
            ends_at,
        })
        .await
        .map_err(|error| format!("failed to create promotion: {error}"))?;

    println!("promotion_code: {}", promotion.code);
    println!("promotion_starts_at: {}", promotion.starts_at);
    if let Some(ends_at) = promotion.ends_at {
        println!("promotion_ends_at: {ends_at}");
    }

    Ok(())
}
