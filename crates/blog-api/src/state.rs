//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use blog_core::AuthConfig;

use crate::auth::{CredentialHasher, HasTokenIssuer, TokenIssuer};
use crate::repository::AuthorStore;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 작성자 저장소 (PostgreSQL 또는 인메모리)
    pub store: Arc<dyn AuthorStore>,

    /// 토큰 발급기 - 시작 시 한 번 생성되는 서명 키 보유
    pub token_issuer: Arc<TokenIssuer>,

    /// 비밀번호 해셔
    pub hasher: CredentialHasher,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(store: Arc<dyn AuthorStore>, auth: &AuthConfig) -> Self {
        Self {
            store,
            token_issuer: Arc::new(TokenIssuer::from_config(auth)),
            hasher: CredentialHasher::new(auth.hash_scheme),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// 저장소 연결 상태 확인.
    pub async fn is_store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

impl HasTokenIssuer for AppState {
    fn token_issuer(&self) -> &TokenIssuer {
        &self.token_issuer
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.kind())
            .field("hasher", &self.hasher)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// 테스트용 AppState 생성 (인메모리 저장소).
#[cfg(test)]
pub fn create_test_state() -> AppState {
    use crate::repository::MemoryAuthorStore;

    let auth = AuthConfig::with_secret(
        "unit-test-signing-secret-padded-out-to-at-least-sixty-four-bytes-long!!",
    );
    AppState::new(Arc::new(MemoryAuthorStore::new()), &auth)
}
