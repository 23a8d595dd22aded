//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 기본값 → `config/default.toml`(선택) → `BLOG__` 접두사 환경 변수 순으로 덮어씁니다.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::{BlogError, BlogResult};

/// HS512 서명 키 최소 길이 (바이트).
pub const MIN_TOKEN_SECRET_LEN: usize = 64;

/// 기본 토큰 유효 기간 (시간).
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// 토큰 유효 기간 상한 (1년, 시간).
pub const MAX_TOKEN_LIFETIME_HOURS: i64 = 24 * 365;

/// 애플리케이션 설정.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL (없으면 인메모리 저장소 사용)
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connection_timeout_secs: u64,
    /// 시작 시 마이그레이션 실행 여부
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connection_timeout_secs: 10,
            run_migrations: true,
        }
    }
}

/// 비밀번호 해시 방식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HashScheme {
    /// 솔트를 키로 사용하는 HMAC-SHA-512 (기존 데이터 호환, 작업 계수 없음)
    #[default]
    HmacSha512,
    /// Argon2id (느린 KDF)
    Argon2id,
}

/// 인증 설정.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// JWT 서명 비밀 키
    #[serde(deserialize_with = "deserialize_secret")]
    pub token_secret: SecretString,
    /// 토큰 유효 기간 (시간)
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_hours: i64,
    /// 새 비밀번호에 사용할 해시 방식
    #[serde(default)]
    pub hash_scheme: HashScheme,
}

fn default_token_lifetime() -> i64 {
    DEFAULT_TOKEN_LIFETIME_HOURS
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(SecretString::new(raw.into_boxed_str()))
}

impl AuthConfig {
    /// 주어진 비밀 키로 기본 인증 설정 생성.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            token_secret: SecretString::new(secret.into().into_boxed_str()),
            token_lifetime_hours: DEFAULT_TOKEN_LIFETIME_HOURS,
            hash_scheme: HashScheme::default(),
        }
    }

    /// 서명 키와 유효 기간 검증.
    ///
    /// HS512 키는 최소 64바이트여야 하고, 유효 기간은 1시간 이상 1년 이하입니다.
    pub fn validate(&self) -> BlogResult<()> {
        let len = self.token_secret.expose_secret().len();
        if len < MIN_TOKEN_SECRET_LEN {
            return Err(BlogError::Config(format!(
                "auth.token_secret must be at least {} bytes for HS512 (got {})",
                MIN_TOKEN_SECRET_LEN, len
            )));
        }
        if !(1..=MAX_TOKEN_LIFETIME_HOURS).contains(&self.token_lifetime_hours) {
            return Err(BlogError::Config(format!(
                "auth.token_lifetime_hours must be between 1 and {} (got {})",
                MAX_TOKEN_LIFETIME_HOURS, self.token_lifetime_hours
            )));
        }
        Ok(())
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 실패하지 않습니다.
    pub fn load<P: AsRef<Path>>(path: P) -> BlogResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("BLOG")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> BlogResult<Self> {
        Self::load("config/default.toml")
    }

    /// 전체 설정 검증.
    pub fn validate(&self) -> BlogResult<()> {
        self.auth.validate()?;
        if self.database.max_connections == 0 {
            return Err(BlogError::Config(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_SECRET: &str =
        "unit-test-signing-secret-that-is-definitely-longer-than-sixty-four-bytes";

    #[test]
    fn test_short_secret_rejected() {
        let auth = AuthConfig::with_secret("too-short");
        assert!(matches!(auth.validate(), Err(BlogError::Config(_))));
    }

    #[test]
    fn test_long_secret_accepted() {
        let auth = AuthConfig::with_secret(LONG_SECRET);
        assert!(auth.validate().is_ok());
        assert_eq!(auth.token_lifetime_hours, 24);
        assert_eq!(auth.hash_scheme, HashScheme::HmacSha512);
    }

    #[test]
    fn test_non_positive_lifetime_rejected() {
        let mut auth = AuthConfig::with_secret(LONG_SECRET);
        auth.token_lifetime_hours = 0;
        assert!(auth.validate().is_err());
    }

    #[test]
    fn test_lifetime_upper_bound() {
        let mut auth = AuthConfig::with_secret(LONG_SECRET);
        auth.token_lifetime_hours = MAX_TOKEN_LIFETIME_HOURS;
        assert!(auth.validate().is_ok());

        auth.token_lifetime_hours = MAX_TOKEN_LIFETIME_HOURS + 1;
        assert!(matches!(auth.validate(), Err(BlogError::Config(_))));

        auth.token_lifetime_hours = 10_000_000_000;
        assert!(auth.validate().is_err());
    }

    #[test]
    fn test_secret_is_redacted_in_debug() {
        let auth = AuthConfig::with_secret(LONG_SECRET);
        let debug = format!("{:?}", auth);
        assert!(!debug.contains(LONG_SECRET));
    }

    #[test]
    fn test_server_bind_address() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_address(), "127.0.0.1:3000");
    }
}
