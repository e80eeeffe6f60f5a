// src/bin/seed.rs
//
// Creates the schema and inserts default accounts and sample questions.
// Run once, out-of-band: `cargo run --bin seed`.

use quiz_backend::{config::DEFAULT_DATABASE_URL, db, seed};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Only the store location is needed here; JWT settings are not.
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    tracing::info!("Initializing database...");
    let pool = db::connect(&database_url, 1).await?;
    db::migrate(&pool).await?;

    let report = seed::run(&pool).await?;
    tracing::info!(
        users = report.users_created,
        questions = report.questions_created,
        "Database initialization completed"
    );
    tracing::info!("Admin login: admin/admin123, user login: user/user123");

    pool.close().await;
    Ok(())
}
