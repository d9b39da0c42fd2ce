//! Runs against a real PostgreSQL reachable through the standard `PG*`
//! variables. The `users` and `posts` tables are dropped and recreated.
//!
//! ```bash
//! PGHOST=localhost PGUSER=postgres PGPASSWORD=postgres PGDATABASE=postgres \
//!   cargo test -p seed-populate-postgresql --test live_postgres -- --ignored
//! ```

use seed_populate_postgresql::{
    ConnectionConfig, LoadConfig, Populator, PostgresProvider, ReadinessConfig,
};
use std::time::Duration;
use tokio_postgres::NoTls;

const SCHEMA: &str = r#"
DROP TABLE IF EXISTS posts;
DROP TABLE IF EXISTS users;
CREATE TABLE users (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL,
    phoneNumber VARCHAR(10) NOT NULL,
    state TEXT NOT NULL CHECK (state IN ('active', 'inactive', 'pending'))
);
CREATE TABLE posts (
    user_id UUID NOT NULL REFERENCES users (id),
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    date TIMESTAMPTZ NOT NULL,
    numberoflike INTEGER NOT NULL
);
"#;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn connection_config() -> ConnectionConfig {
    ConnectionConfig {
        host: env_or("PGHOST", "localhost"),
        port: env_or("PGPORT", "5432").parse().unwrap(),
        database: env_or("PGDATABASE", "postgres"),
        user: env_or("PGUSER", "postgres"),
        password: env_or("PGPASSWORD", "postgres"),
        pool_size: 4,
    }
}

async fn admin_client(config: &ConnectionConfig) -> tokio_postgres::Client {
    let conn_str = format!(
        "host={} port={} user={} password={} dbname={}",
        config.host, config.port, config.user, config.password, config.database
    );
    let (client, connection) = tokio_postgres::connect(&conn_str, NoTls).await.unwrap();
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("PostgreSQL connection error: {e}");
        }
    });
    client
}

async fn count(client: &tokio_postgres::Client, table: &str) -> i64 {
    let row = client
        .query_one(&format!("SELECT COUNT(*) FROM {table}"), &[])
        .await
        .unwrap();
    row.get(0)
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_seed_real_database() {
    let config = connection_config();
    let client = admin_client(&config).await;
    client.batch_execute(SCHEMA).await.unwrap();

    let provider = PostgresProvider::new(&config).unwrap();
    let report = Populator::new(&provider, LoadConfig::new(1000, 100, 5))
        .with_readiness(ReadinessConfig {
            max_attempts: 5,
            retry_interval: Duration::from_secs(1),
        })
        .run()
        .await
        .unwrap();

    assert!(report.is_success(), "failures: {:?}", report.failures);
    assert_eq!(report.users_inserted, 1000);
    assert_eq!(report.posts_inserted, 2000);
    assert_eq!(count(&client, "users").await, 1000);
    assert_eq!(count(&client, "posts").await, 2000);

    let orphans = client
        .query_one(
            "SELECT COUNT(*) FROM posts p LEFT JOIN users u ON u.id = p.user_id WHERE u.id IS NULL",
            &[],
        )
        .await
        .unwrap();
    assert_eq!(orphans.get::<_, i64>(0), 0);

    let bad_phones = client
        .query_one(
            "SELECT COUNT(*) FROM users WHERE phoneNumber !~ '^[0-9]{10}$'",
            &[],
        )
        .await
        .unwrap();
    assert_eq!(bad_phones.get::<_, i64>(0), 0);
}
