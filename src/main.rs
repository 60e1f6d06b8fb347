use jot_api::config;
use jot_api::database::DatabaseManager;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting jot-api in {:?} mode", config.environment);

    // Apply migrations when the database is reachable. A cold database only
    // degrades /health; it does not block startup.
    if let Err(e) = DatabaseManager::migrate().await {
        tracing::warn!("Skipping migrations, database not ready: {}", e);
    }

    let app = jot_api::app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("JOT_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8080);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("jot-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
