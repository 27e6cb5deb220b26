use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use dm_api::config;
use dm_api::database::DatabaseManager;
use dm_api::handlers::{messages, threads};
use dm_api::middleware::jwt_auth_middleware;
use dm_api::state::AppState;

#[derive(Parser)]
#[command(name = "dm-api", version, about = "Two-party direct messaging REST backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Port to bind; falls back to DM_API_PORT / PORT, then 3000
        #[arg(long)]
        port: Option<u16>,
    },
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting dm-api in {:?} mode", config.environment);

    match Cli::parse().command.unwrap_or(Command::Serve { port: None }) {
        Command::Migrate => DatabaseManager::migrate().await?,
        Command::Serve { port } => serve(port).await?,
    }

    Ok(())
}

async fn serve(port: Option<u16>) -> Result<()> {
    DatabaseManager::migrate().await?;

    let pool = DatabaseManager::pool().await?;
    let app = app(AppState::new(pool));

    // Allow tests or deployments to override port via env
    let port = port
        .or_else(|| std::env::var("DM_API_PORT").ok().and_then(|s| s.parse().ok()))
        .or_else(|| std::env::var("PORT").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("dm-api listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    let config = config::config();

    // Every thread/message route sits behind bearer authentication
    let protected = Router::new()
        .merge(thread_routes())
        .merge(message_routes())
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
        .with_state(state);

    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

fn thread_routes() -> Router<AppState> {
    Router::new()
        .route("/threads", get(threads::thread_list).post(threads::thread_post))
        .route(
            "/threads/:id",
            get(threads::thread_get).delete(threads::thread_delete),
        )
        .route("/threads/user/:user_id", get(threads::thread_list_by_user))
}

fn message_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/messages/unread", get(messages::unread_count))
        .route("/messages/threads/:id", get(messages::thread_messages))
        .route(
            "/messages/:id",
            post(messages::message_post).put(messages::message_read),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "dm-api",
            "version": version,
            "description": "Two-party direct messaging REST backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "threads": "/threads[/:id] (bearer token)",
                "threads_by_user": "/threads/user/:user_id (bearer token, admin)",
                "messages": "/messages/:thread_id (bearer token)",
                "thread_messages": "/messages/threads/:id (bearer token)",
                "unread": "/messages/unread (bearer token)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
