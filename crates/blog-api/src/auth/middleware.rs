//! Axum용 JWT 인증 추출기.
//!
//! `Authorization: Bearer <token>` 헤더를 검증해 [`Claims`]를 꺼냅니다.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::{Claims, TokenError, TokenIssuer};
use crate::error::ApiErrorResponse;

/// JWT 인증 추출기.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(claims): JwtAuth,
/// ) -> impl IntoResponse {
///     format!("Authenticated author: {}", claims.display_name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

/// JWT 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtAuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
}

impl JwtAuthError {
    fn code(&self) -> &'static str {
        match self {
            JwtAuthError::MissingToken => "MISSING_TOKEN",
            JwtAuthError::InvalidAuthHeader => "INVALID_AUTH_HEADER",
            JwtAuthError::TokenExpired => "TOKEN_EXPIRED",
            JwtAuthError::InvalidToken => "INVALID_TOKEN",
        }
    }
}

impl From<TokenError> for JwtAuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => JwtAuthError::TokenExpired,
            TokenError::Malformed | TokenError::BadSignature | TokenError::Signing => {
                JwtAuthError::InvalidToken
            }
        }
    }
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorResponse::new(self.code(), self.to_string()));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// 토큰 발급기를 보유한 라우터 상태.
pub trait HasTokenIssuer {
    fn token_issuer(&self) -> &TokenIssuer;
}

impl HasTokenIssuer for TokenIssuer {
    fn token_issuer(&self) -> &TokenIssuer {
        self
    }
}

impl<T: HasTokenIssuer> HasTokenIssuer for Arc<T> {
    fn token_issuer(&self) -> &TokenIssuer {
        (**self).token_issuer()
    }
}

impl<S> FromRequestParts<S> for JwtAuth
where
    S: HasTokenIssuer + Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Authorization 헤더에서 토큰 추출
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(JwtAuthError::MissingToken)?;

        // Bearer 토큰 형식 확인
        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(JwtAuthError::InvalidAuthHeader)?;

        let claims = state.token_issuer().validate(token).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            JwtAuthError::from(e)
        })?;

        Ok(JwtAuth(claims))
    }
}
