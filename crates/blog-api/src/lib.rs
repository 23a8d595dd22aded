//! 블로그 작성자 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 비밀번호 해싱, HS512 토큰, 역할 기반 접근 정책
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 자격증명/토큰/접근 정책
//! - [`repository`]: 작성자 저장소 (PostgreSQL, 인메모리)
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{Claims, CredentialHasher, JwtAuth, JwtAuthError, Role, TokenError, TokenIssuer};
pub use error::{ApiErrorResponse, ApiResult};
pub use repository::{AuthorStore, MemoryAuthorStore, PgAuthorStore};
pub use routes::*;
pub use state::AppState;

#[cfg(test)]
pub use state::create_test_state;
