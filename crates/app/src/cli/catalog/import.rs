use std::path::PathBuf;

use clap::Args;
use sillage_app::{
    database::{self, Db},
    domain::catalog::{CatalogService, PgCatalogService, data::CatalogFixture},
};

#[derive(Debug, Args)]
pub(crate) struct ImportCatalogArgs {
    /// YAML fixture listing products and their sizes
    file: PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ImportCatalogArgs) -> Result<(), String> {
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let fixture: CatalogFixture = serde_norway::from_str(&raw)
        .map_err(|error| format!("failed to parse {}: {error}", args.file.display()))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCatalogService::new(Db::new(pool));

    for product in fixture.products {
        let (product, sizes) = product.into_parts();

        let (record, sizes) = service
            .import_product(product, sizes)
            .await
            .map_err(|error| format!("failed to import product: {error}"))?;

        println!("{} {} ({} sizes)", record.uuid, record.name, sizes.len());
    }

    Ok(())
}
