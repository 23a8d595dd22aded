//! JWT 토큰 처리.
//!
//! HS512로 서명된 Access Token 발급/검증 로직.
//!
//! 페이로드 필드명은 기존 클라이언트와 호환되도록 `nameid`, `unique_name`,
//! `email`, `role`, `nbf`, `iat`, `exp`를 사용합니다. 발급자(iss)와
//! 대상(aud)은 검증하지 않습니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use blog_core::AuthConfig;

use super::Role;

/// 인증된 사용자 정보.
///
/// 토큰 검증 시 생성되며 요청이 끝나면 버려집니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// 작성자 ID
    pub subject_id: i32,
    /// 작성자 이름
    pub display_name: String,
    /// 이메일
    pub email: String,
    /// 역할
    pub role: Role,
}

impl Claims {
    pub fn new(
        subject_id: i32,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            subject_id,
            display_name: display_name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// JWT 페이로드 (와이어 형식).
#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    /// 작성자 ID (10진수 문자열)
    nameid: String,
    unique_name: String,
    email: String,
    role: Role,
    /// Not Before (Unix timestamp)
    nbf: i64,
    /// Issued At (Unix timestamp)
    iat: i64,
    /// Expiration (Unix timestamp)
    exp: i64,
}

/// JWT 토큰 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("잘못된 토큰 형식")]
    Malformed,
    #[error("토큰 서명 검증 실패")]
    BadSignature,
    #[error("토큰이 만료되었습니다")]
    Expired,
    #[error("토큰 서명 실패")]
    Signing,
}

/// 토큰 발급기.
///
/// 시작 시 한 번 생성되어 `AppState`를 통해 공유되며, 이후 변경되지 않습니다.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &Algorithm::HS512)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// 비밀 키와 유효 기간(시간)으로 발급기 생성.
    ///
    /// 키 길이 검증은 설정 로딩 단계([`AuthConfig::validate`])에서 수행합니다.
    pub fn new(secret: &SecretString, lifetime_hours: i64) -> Self {
        let key = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS512);
        // 만료는 validate_at에서 직접 판정 (now >= exp 이면 만료)
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            validation,
            // 범위를 넘는 값은 발급 시점에 Signing 에러로 드러남
            lifetime: Duration::try_hours(lifetime_hours).unwrap_or(Duration::MAX),
        }
    }

    /// 인증 설정으로 발급기 생성.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.token_secret, config.token_lifetime_hours)
    }

    /// 현재 시각 기준으로 토큰 발급.
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        self.issue_at(claims, Utc::now())
    }

    /// 지정한 발급 시각으로 토큰 발급.
    ///
    /// `exp = issued_at + lifetime`
    pub fn issue_at(&self, claims: &Claims, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let expires_at = issued_at.checked_add_signed(self.lifetime).ok_or_else(|| {
            tracing::error!(lifetime = ?self.lifetime, "Token expiry overflows the calendar");
            TokenError::Signing
        })?;
        let iat = issued_at.timestamp();
        let payload = TokenPayload {
            nameid: claims.subject_id.to_string(),
            unique_name: claims.display_name.clone(),
            email: claims.email.clone(),
            role: claims.role,
            nbf: iat,
            iat,
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS512), &payload, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::Signing
        })
    }

    /// 현재 시각 기준으로 토큰 검증.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// 지정한 시각 기준으로 토큰 검증.
    ///
    /// 서명 → 구조 → 만료 순서로 확인합니다.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = decode::<TokenPayload>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            },
        )?;

        let payload = data.claims;
        if now.timestamp() >= payload.exp {
            return Err(TokenError::Expired);
        }

        let subject_id = payload
            .nameid
            .parse::<i32>()
            .map_err(|_| TokenError::Malformed)?;

        Ok(Claims {
            subject_id,
            display_name: payload.unique_name,
            email: payload.email,
            role: payload.role,
        })
    }
}
