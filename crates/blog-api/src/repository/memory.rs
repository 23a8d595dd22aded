//! 인메모리 작성자 저장소.
//!
//! 데이터베이스 없이 서버를 띄우거나 핸들러를 테스트할 때 사용합니다.
//! 프로세스가 종료되면 데이터는 사라집니다.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Author, AuthorChanges, AuthorStore, NewAuthor, StoreError};
use crate::auth::Credential;

#[derive(Debug, Default)]
struct Inner {
    next_id: i32,
    authors: BTreeMap<i32, Author>,
}

/// PostgreSQL `LOWER(email)` 비교와 같은 규칙 (유니코드 소문자화).
fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Inner {
    fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> bool {
        self.authors
            .values()
            .any(|a| Some(a.id) != exclude_id && same_email(&a.email, email))
    }
}

/// `RwLock<BTreeMap>` 기반 저장소.
#[derive(Debug, Default)]
pub struct MemoryAuthorStore {
    inner: RwLock<Inner>,
}

impl MemoryAuthorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorStore for MemoryAuthorStore {
    async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.email_taken(email, exclude_id))
    }

    async fn create(&self, author: NewAuthor) -> Result<Author, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&author.email, None) {
            return Err(StoreError::DuplicateEmail);
        }

        inner.next_id += 1;
        let now = Utc::now();
        let record = Author {
            id: inner.next_id,
            author_name: author.author_name,
            email: author.email,
            password_hash: author.credential.password_hash,
            password_salt: author.credential.password_salt,
            role: author.role,
            created_at: now,
            updated_at: now,
        };
        inner.authors.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, StoreError> {
        Ok(self.inner.read().await.authors.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Author>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .authors
            .values()
            .find(|a| same_email(&a.email, email))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Author>, StoreError> {
        Ok(self.inner.read().await.authors.values().cloned().collect())
    }

    async fn update(&self, id: i32, changes: AuthorChanges) -> Result<Author, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&changes.email, Some(id)) {
            return Err(StoreError::DuplicateEmail);
        }

        let author = inner.authors.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        author.author_name = changes.author_name;
        author.email = changes.email;
        author.password_hash = changes.credential.password_hash;
        author.password_salt = changes.credential.password_salt;
        author.role = changes.role;
        author.updated_at = Utc::now();
        Ok(author.clone())
    }

    async fn update_credential(&self, id: i32, credential: Credential) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let author = inner.authors.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        author.password_hash = credential.password_hash;
        author.password_salt = credential.password_salt;
        author.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.authors.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
