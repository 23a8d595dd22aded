//! PostgreSQL 작성자 저장소.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Author, AuthorChanges, AuthorStore, NewAuthor, StoreError};
use crate::auth::Credential;

const AUTHOR_COLUMNS: &str =
    "id, author_name, email, password_hash, password_salt, role, created_at, updated_at";

/// sqlx 기반 작성자 저장소.
#[derive(Debug, Clone)]
pub struct PgAuthorStore {
    pool: PgPool,
}

impl PgAuthorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 유일 인덱스 위반을 중복 이메일로 변환
fn map_unique_violation(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl AuthorStore for PgAuthorStore {
    async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, StoreError> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM authors
                WHERE LOWER(email) = LOWER($1)
                  AND ($2::INTEGER IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn create(&self, author: NewAuthor) -> Result<Author, StoreError> {
        let query = format!(
            r#"
            INSERT INTO authors (author_name, email, password_hash, password_salt, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        );

        sqlx::query_as::<_, Author>(&query)
            .bind(&author.author_name)
            .bind(&author.email)
            .bind(&author.credential.password_hash)
            .bind(&author.credential.password_salt)
            .bind(author.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, StoreError> {
        let query = format!("SELECT {} FROM authors WHERE id = $1", AUTHOR_COLUMNS);
        let author = sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(author)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Author>, StoreError> {
        let query = format!(
            "SELECT {} FROM authors WHERE LOWER(email) = LOWER($1)",
            AUTHOR_COLUMNS
        );
        let author = sqlx::query_as::<_, Author>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(author)
    }

    async fn list(&self) -> Result<Vec<Author>, StoreError> {
        let query = format!("SELECT {} FROM authors ORDER BY id", AUTHOR_COLUMNS);
        let authors = sqlx::query_as::<_, Author>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(authors)
    }

    async fn update(&self, id: i32, changes: AuthorChanges) -> Result<Author, StoreError> {
        let query = format!(
            r#"
            UPDATE authors
            SET author_name = $2,
                email = $3,
                password_hash = $4,
                password_salt = $5,
                role = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        );

        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .bind(&changes.author_name)
            .bind(&changes.email)
            .bind(&changes.credential.password_hash)
            .bind(&changes.credential.password_salt)
            .bind(changes.role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_unique_violation)?
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_credential(&self, id: i32, credential: Credential) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE authors
            SET password_hash = $2, password_salt = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&credential.password_hash)
        .bind(&credential.password_salt)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        // blogs는 ON DELETE CASCADE로 함께 삭제됨
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "postgres"
    }
}
