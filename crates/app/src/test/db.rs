//! Per-test databases on a shared PostgreSQL container.
//!
//! Every [`TestDb`] is a freshly migrated database inside one container that
//! is started on first use. Services commit normally; isolation comes from the
//! database boundary, and databases are dropped in the background once their
//! `TestDb` goes away.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, Postgres, Transaction};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

const DB_USER: &str = "sillage_test";
const DB_PASSWORD: &str = "sillage_test_password";

struct TestServer {
    _container: ContainerAsync<PostgresImage>,
    host: String,
    port: u16,
}

impl TestServer {
    async fn start() -> Self {
        let container = PostgresImage::default()
            .with_user(DB_USER)
            .with_password(DB_PASSWORD)
            .with_db_name(DB_USER)
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");

        let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
            .unwrap_or_else(|_| "localhost".to_string());

        Self {
            _container: container,
            host,
            port,
        }
    }

    fn url(&self, database: &str) -> String {
        format!(
            "postgresql://{DB_USER}:{DB_PASSWORD}@{}:{}/{database}",
            self.host, self.port
        )
    }

    async fn admin_connection(&self) -> Result<PgConnection, sqlx::Error> {
        PgConnection::connect(&self.url("postgres")).await
    }
}

static SERVER: Lazy<OnceCell<TestServer>> = Lazy::new(OnceCell::new);

static DROPPER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn spawn_dropper() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(err) = drop_database(&name).await {
                eprintln!("Failed to drop test database '{name}': {err}");
            }
        }
    });

    sender
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    let Some(server) = SERVER.get() else {
        return Ok(());
    };

    let mut conn = server.admin_connection().await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// Generated names are lowercase ASCII, digits and underscores only, so they
/// can be interpolated into DDL.
fn database_name() -> String {
    format!("sillage_{}", Uuid::now_v7().simple())
}

#[derive(Debug, Clone)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = DROPPER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    /// Create and migrate an isolated database.
    pub async fn new() -> Self {
        DROPPER.get_or_init(spawn_dropper).await;

        let server = SERVER.get_or_init(TestServer::start).await;
        let name = database_name();

        let mut conn = server
            .admin_connection()
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&server.url(&name))
            .await
            .expect("Failed to create pool for database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self { pool, name }
    }

    /// A transaction that rolls back when dropped, for repository tests that
    /// inspect intermediate state.
    pub async fn begin_test_transaction(&self) -> Transaction<'static, Postgres> {
        self.pool
            .begin()
            .await
            .expect("Failed to start test transaction")
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_safe_identifiers() {
        let name = database_name();

        assert!(name.len() <= 63);
        assert!(
            name.bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
        );
        assert_ne!(name, database_name());
    }

    #[tokio::test]
    async fn migrated_database_accepts_queries() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'orders'",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to query information_schema");

        assert_eq!(tables, 1);
    }

    #[tokio::test]
    async fn test_transactions_roll_back_on_drop() {
        let test_db = TestDb::new().await;

        {
            let mut tx = test_db.begin_test_transaction().await;

            sqlx::query("INSERT INTO users (uuid, email) VALUES ($1, 'temp@example.com')")
                .bind(Uuid::now_v7())
                .execute(&mut *tx)
                .await
                .expect("Failed to insert in test transaction");
        }

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to count users");

        assert_eq!(users, 0);
    }
}
