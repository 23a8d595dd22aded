//! Blog API 서버 진입점.
//!
//! 설정 로드 → 로깅 초기화 → 저장소 연결 → 라우터 구성 → 서버 시작 순서로 진행합니다.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use blog_api::openapi::swagger_ui_router;
use blog_api::repository::{AuthorStore, MemoryAuthorStore, PgAuthorStore};
use blog_api::{create_api_router, AppState};
use blog_core::{init_logging, AppConfig, DatabaseConfig, LogConfig};

/// 설정에 맞는 작성자 저장소 생성.
///
/// `database.url`이 없으면 인메모리 저장소로 동작합니다.
async fn create_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn AuthorStore>> {
    let Some(url) = config.url.as_deref() else {
        warn!("database.url not set, using in-memory author store (data is not persisted)");
        return Ok(Arc::new(MemoryAuthorStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect(url)
        .await
        .context("Failed to connect to database")?;
    info!(max_connections = config.max_connections, "Connected to PostgreSQL");

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Database migrations applied");
    }

    Ok(Arc::new(PgAuthorStore::new(pool)))
}

/// CORS 레이어 생성.
///
/// `CORS_ORIGINS`(쉼표 구분)가 설정되어 있으면 해당 origin만 허용하고,
/// 없으면 개발 모드로 간주하여 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let origins: Vec<_> = std::env::var("CORS_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
        AllowOrigin::any()
    } else {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 구성.
fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .merge(create_api_router().with_state(state))
        .merge(swagger_ui_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("Failed to load configuration")?;
    init_logging(LogConfig::from(&config.logging)).context("Failed to initialize logging")?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Blog API server...");
    info!(
        hash_scheme = ?config.auth.hash_scheme,
        token_lifetime_hours = config.auth.token_lifetime_hours,
        "Auth configured"
    );

    let store = create_store(&config.database).await?;
    let state = Arc::new(AppState::new(store, &config.auth));

    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기 (Ctrl+C 또는 SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
