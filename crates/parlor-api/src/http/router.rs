//! Axum router configuration with middleware.
//!
//! All routes are under `/api/`. Middleware: CORS (wide open, the API is a
//! local prototype), request tracing.
//!
//! If a web directory exists (default `web/`, configurable via
//! `PARLOR_WEB_DIR`), the static client is served from it; API routes take
//! priority and unknown paths fall through to `index.html`.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState, web_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Accounts
        .route("/register", post(handlers::account::register))
        .route("/login", post(handlers::account::login))
        // Chat threads. `/chats/{id}` reads a user id on GET but a chat id
        // on PUT/DELETE; this asymmetry is the client's established contract.
        .route("/new-chat", post(handlers::chat::new_chat))
        .route(
            "/chats/{id}",
            get(handlers::chat::list_chats)
                .put(handlers::chat::rename_chat)
                .delete(handlers::chat::delete_chat),
        )
        .route("/chat-info/{chat_id}", get(handlers::chat::chat_info))
        // Messages
        .route("/messages/{chat_id}", get(handlers::message::get_messages))
        // Chat turn
        .route("/chat", post(handlers::turn::chat_turn));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the static client from disk if the directory exists. API routes
    // and /health take priority; unknown paths fall through to index.html.
    if std::path::Path::new(web_dir).exists() {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "Static file serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
