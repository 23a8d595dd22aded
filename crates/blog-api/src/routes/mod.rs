//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/authors` - 작성자 가입/로그인/관리

pub mod authors;
pub mod health;

pub use authors::{
    authors_router, AuthResponse, LoginAuthorRequest, RegisterAuthorRequest, UpdateAuthorRequest,
};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/api/authors", authors_router())
}
