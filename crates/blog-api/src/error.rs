//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::auth::PolicyDenied;
use crate::repository::StoreError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "AUTHOR_NOT_FOUND",
///   "message": "작성자를 찾을 수 없습니다: 42",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "VALIDATION_ERROR", "FORBIDDEN", "AUTHOR_NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    ///
    /// # Example
    ///
    /// ```
    /// use blog_api::error::ApiErrorResponse;
    ///
    /// let error = ApiErrorResponse::new("AUTHOR_NOT_FOUND", "Author not found");
    /// assert_eq!(error.code, "AUTHOR_NOT_FOUND");
    /// ```
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// 핸들러 에러 (상태 코드 + JSON 본문).
pub type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

/// 상태 코드와 에러 코드로 에러 생성.
pub fn api_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (status, Json(ApiErrorResponse::new(code, message)))
}

/// 403 - 정책 거부.
pub fn forbidden(_: PolicyDenied) -> ApiError {
    api_error(StatusCode::FORBIDDEN, "FORBIDDEN", "접근 권한이 없습니다")
}

/// 404 - 작성자 없음.
pub fn author_not_found(id: i32) -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        "AUTHOR_NOT_FOUND",
        format!("작성자를 찾을 수 없습니다: {}", id),
    )
}

/// 400 - 이메일 중복.
pub fn email_exists() -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "EMAIL_EXISTS", "Email already exists")
}

/// 401 - 로그인 실패.
///
/// 이메일이 없는 경우와 비밀번호가 틀린 경우를 구분하지 않습니다.
pub fn invalid_credentials() -> ApiError {
    api_error(
        StatusCode::UNAUTHORIZED,
        "INVALID_CREDENTIALS",
        "Invalid email or password",
    )
}

/// 500 - 내부 에러.
///
/// 원인은 로그에만 남기고 응답에는 일반 메시지만 담습니다.
pub fn internal_error(context: &str, err: impl std::fmt::Display) -> ApiError {
    error!(error = %err, "{}", context);
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "내부 서버 에러가 발생했습니다",
    )
}

/// 저장소 에러 변환.
pub fn store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::DuplicateEmail => email_exists(),
        StoreError::NotFound(id) => author_not_found(id),
        other => internal_error("Author store failure", other),
    }
}

/// 400 - 입력 검증 실패.
pub fn validation_error(errors: &ValidationErrors) -> ApiError {
    let message = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: 유효하지 않은 값", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ");

    api_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
}
