//! 작성자 저장소.
//!
//! - [`PgAuthorStore`]: PostgreSQL (sqlx)
//! - [`MemoryAuthorStore`]: `DATABASE_URL` 미설정 시 사용하는 인메모리 저장소
//!
//! 핸들러는 [`AuthorStore`] 트레이트 객체만 사용합니다.

mod authors;
mod memory;

pub use authors::PgAuthorStore;
pub use memory::MemoryAuthorStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::auth::{Claims, Credential, Role};

/// 작성자 레코드.
#[derive(Debug, Clone, FromRow)]
pub struct Author {
    pub id: i32,
    pub author_name: String,
    pub email: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Author {
    /// 토큰에 담을 신원 정보.
    pub fn claims(&self) -> Claims {
        Claims::new(self.id, &self.author_name, &self.email, self.role)
    }

    /// 외부 노출용 요약 (해시/솔트 제외).
    pub fn summary(&self) -> AuthorSummary {
        AuthorSummary {
            id: self.id,
            author_name: self.author_name.clone(),
            email: self.email.clone(),
            role: self.role.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// 작성자 요약 응답.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: i32,
    pub author_name: String,
    pub email: String,
    /// "Admin" | "Author" | "Guest"
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 작성자 입력.
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub author_name: String,
    pub email: String,
    pub credential: Credential,
    pub role: Role,
}

/// 작성자 수정 입력 (전체 필드 교체).
#[derive(Debug, Clone)]
pub struct AuthorChanges {
    pub author_name: String,
    pub email: String,
    pub credential: Credential,
    pub role: Role,
}

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("이미 사용 중인 이메일")]
    DuplicateEmail,
    #[error("작성자를 찾을 수 없음: {0}")]
    NotFound(i32),
    #[error("데이터베이스 에러: {0}")]
    Database(#[from] sqlx::Error),
}

/// 작성자 저장소 인터페이스.
///
/// 이메일 비교는 모두 대소문자를 구분하지 않습니다.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// 다른 작성자가 이 이메일을 사용 중인지 확인 (`exclude_id`는 제외).
    async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, StoreError>;

    async fn create(&self, author: NewAuthor) -> Result<Author, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Author>, StoreError>;

    /// ID 순 전체 목록.
    async fn list(&self) -> Result<Vec<Author>, StoreError>;

    /// 이름/이메일/역할/자격증명 교체 후 `updated_at` 갱신.
    async fn update(&self, id: i32, changes: AuthorChanges) -> Result<Author, StoreError>;

    /// 자격증명만 교체 (로그인 시 해시 방식 전환용).
    async fn update_credential(&self, id: i32, credential: Credential) -> Result<(), StoreError>;

    /// 삭제. 존재하지 않았으면 `false`.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// 저장소 연결 확인.
    async fn ping(&self) -> Result<(), StoreError>;

    /// 저장소 종류 (헬스 체크 표시용).
    fn kind(&self) -> &'static str;
}
