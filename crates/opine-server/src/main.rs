//! Opine Review Server
//!
//! A minimal HTTP service that accepts free-text reviews, labels each with a
//! keyword-derived sentiment, and serves them back filtered by label.
//!
//! Uses SQLite (embedded) so a single binary plus one file is the whole
//! deployment.

mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use opine_core::SentimentClassifier;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use services::ReviewService;
use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub reviews: Arc<ReviewService>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        eprintln!("[PANIC] at {:?}: {}", location, info);
        tracing::error!("PANIC at {:?}: {}", location, info);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Starting Opine Review Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = load_config()
        .await
        .context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_path
    );

    let db = Arc::new(
        Database::new(&config.database_path)
            .await
            .context("Failed to initialize database")?,
    );

    let reviews = Arc::new(ReviewService::new(db, SentimentClassifier::default()));
    let state = AppState { reviews };

    info!("Building HTTP router...");
    let app = router(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/reviews",
            get(handlers::reviews::list).post(handlers::reviews::create),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    database_path: String,
}

async fn load_config() -> Result<Config> {
    let data_dir = std::env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"));

    tokio::fs::create_dir_all(&data_dir)
        .await
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    let database_path = std::env::var("DATABASE_PATH")
        .unwrap_or_else(|_| data_dir.join("reviews.db").to_string_lossy().to_string());

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    Ok(Config {
        bind_address,
        database_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn test_app(dir: &tempfile::TempDir) -> Router {
        let path = dir.path().join("reviews.db");
        let db = Arc::new(Database::new(path.to_str().unwrap()).await.unwrap());
        let reviews = Arc::new(ReviewService::new(db, SentimentClassifier::default()));
        router(AppState { reviews })
    }

    fn post_review(text: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/reviews")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"text": "{}"}}"#, text)))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_post_review_classifies_server_side() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        for (text, sentiment) in [
            ("Это отлично!", "positive"),
            ("Ужасный баг, тормозит", "negative"),
            ("Обычный текст", "neutral"),
        ] {
            let response = app.clone().oneshot(post_review(text)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = body_json(response).await;
            assert_eq!(body["sentiment"], sentiment);
            assert_eq!(body["text"], text);
            assert!(body["id"].as_i64().unwrap() > 0);
        }
    }

    #[tokio::test]
    async fn test_filtered_list_returns_matching_subset() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        for text in ["Это отлично!", "Ужасный баг, тормозит", "Обычный текст"] {
            let response = app.clone().oneshot(post_review(text)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(get_request("/reviews?sentiment=positive"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let reviews = body.as_array().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0]["text"], "Это отлично!");

        // No filter returns the full set in insertion order
        let response = app.oneshot(get_request("/reviews")).await.unwrap();
        let body = body_json(response).await;
        let reviews = body.as_array().unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews[0]["text"], "Это отлично!");
        assert_eq!(reviews[2]["text"], "Обычный текст");
    }

    #[tokio::test]
    async fn test_unknown_filter_label_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        let response = app
            .oneshot(get_request("/reviews?sentiment=angry"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_client_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        // Missing the required "text" field
        let request = Request::builder()
            .method("POST")
            .uri("/reviews")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
