pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validate;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full application router. Shared by the binary and the
/// integration tests.
pub fn app() -> Router {
    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public: registration and login issue the tokens everything else consumes
        .route("/api/users", post(handlers::users::register))
        .route("/api/login", post(handlers::session::login))
        // Protected API
        .merge(protected_routes());

    if config::config().security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    app.layer(TraceLayer::new_for_http())
}

fn protected_routes() -> Router {
    Router::new()
        .merge(folder_routes())
        .merge(note_routes())
        .merge(tag_routes())
        .route("/api/refresh", post(handlers::session::refresh))
        .layer(axum_middleware::from_fn(middleware::auth::jwt_auth_middleware))
}

fn folder_routes() -> Router {
    use handlers::folders;

    Router::new()
        .route("/api/folders", get(folders::list).post(folders::create))
        .route(
            "/api/folders/:id",
            get(folders::get).put(folders::update).delete(folders::delete),
        )
}

fn note_routes() -> Router {
    use handlers::notes;

    Router::new()
        .route("/api/notes", get(notes::list).post(notes::create))
        .route(
            "/api/notes/:id",
            get(notes::get).put(notes::update).delete(notes::delete),
        )
}

fn tag_routes() -> Router {
    use handlers::tags;

    Router::new()
        .route("/api/tags", get(tags::list).post(tags::create))
        .route("/api/tags/:id", get(tags::get).put(tags::update).delete(tags::delete))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "jot-api",
        "version": version,
        "description": "Note-taking REST backend built with Rust (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "register": "POST /api/users (public)",
            "login": "POST /api/login (public)",
            "refresh": "POST /api/refresh (protected)",
            "folders": "/api/folders[/:id] (protected)",
            "notes": "/api/notes[/:id] (protected)",
            "tags": "/api/tags[/:id] (protected)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
