//! 인증 및 권한 부여.
//!
//! JWT 기반 인증과 역할 기반 접근 제어(RBAC)를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`CredentialHasher`]: 비밀번호 해싱/검증
//! - [`TokenIssuer`]: HS512 토큰 발급/검증
//! - [`policy`]: 작성자 리소스 접근 정책
//! - [`JwtAuth`]: Axum 핸들러용 JWT 검증 추출기
//!
//! 모든 구성 요소는 상태가 없고 CPU 연산만 수행하므로 요청 간에 자유롭게 공유됩니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn protected_handler(
//!     JwtAuth(claims): JwtAuth,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", claims.display_name)
//! }
//! ```

mod jwt;
mod middleware;
mod password;
pub mod policy;
mod roles;

pub use jwt::{Claims, TokenError, TokenIssuer};
pub use middleware::{HasTokenIssuer, JwtAuth, JwtAuthError};
pub use password::{
    Credential, CredentialHasher, HashError, ARGON2_HASH_LEN, ARGON2_SALT_LEN, HMAC_HASH_LEN,
    HMAC_SALT_LEN,
};
pub use policy::PolicyDenied;
pub use roles::Role;
