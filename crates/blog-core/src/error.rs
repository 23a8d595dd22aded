//! 블로그 백엔드의 에러 타입.
//!
//! 설정 로딩과 로깅 초기화 같은 시작 단계 에러를 다룹니다.
//! 요청 처리 중의 에러는 API 계층의 `StoreError`/`ApiError`가 담당합니다.

use thiserror::Error;

/// 핵심 서비스 에러.
#[derive(Debug, Error)]
pub enum BlogError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 서비스 작업을 위한 Result 타입.
pub type BlogResult<T> = Result<T, BlogError>;

impl From<config::ConfigError> for BlogError {
    fn from(err: config::ConfigError) -> Self {
        BlogError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let err: BlogError = config::ConfigError::NotFound("auth.token_secret".to_string()).into();
        assert!(matches!(err, BlogError::Config(ref msg) if msg.contains("auth.token_secret")));
    }

    #[test]
    fn test_display_includes_message() {
        let err = BlogError::Internal("failed to install subscriber".to_string());
        assert!(err.to_string().contains("failed to install subscriber"));
    }
}
