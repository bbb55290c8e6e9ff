use dotenvy::dotenv;
use gatehouse::{
    api::{self, AppState},
    config::{self, database},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load service settings
    let app_config = config::load_app_config()
        .inspect_err(|e| error!("Critical error loading configuration: {e}"))?;

    // 4. Connect and make sure the tables exist
    let database_url = database::get_database_url();
    if database_url.starts_with("sqlite://data/") {
        std::fs::create_dir_all("data")?;
    }
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Serve
    let bind_address = app_config.server.bind_address.clone();
    let app = api::router(AppState::new(db, app_config));
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .inspect_err(|e| error!("Failed to bind {bind_address}: {e}"))?;

    info!(%bind_address, "gatehouse listening");
    axum::serve(listener, app).await?;

    Ok(())
}
