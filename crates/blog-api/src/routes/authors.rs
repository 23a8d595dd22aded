//! 작성자 관리 endpoint.
//!
//! - `POST /api/authors/register` - 회원가입 (토큰 발급)
//! - `POST /api/authors/login` - 로그인 (토큰 발급)
//! - `GET /api/authors` - 전체 목록 (관리자 전용)
//! - `GET /api/authors/{id}` - 단건 조회
//! - `PATCH /api/authors/{id}` - 수정
//! - `DELETE /api/authors/{id}` - 삭제
//!
//! 조회/수정/삭제는 존재 여부(404)를 먼저 확인한 뒤 접근 정책(403)을 적용합니다.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{policy, JwtAuth, Role};
use crate::error::{
    author_not_found, email_exists, forbidden, internal_error, invalid_credentials, store_error,
    validation_error, ApiErrorResponse, ApiResult,
};
use crate::repository::{Author, AuthorChanges, AuthorSummary, NewAuthor};
use crate::state::AppState;

// ==================== 요청/응답 타입 ====================

/// 회원가입 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAuthorRequest {
    #[validate(length(min = 1, max = 50, message = "작성자 이름은 1-50자여야 합니다"))]
    pub author_name: String,
    #[validate(
        email(message = "올바른 이메일 형식이 아닙니다"),
        length(max = 256, message = "이메일은 256자를 넘을 수 없습니다")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "비밀번호는 6자 이상이어야 합니다"))]
    pub password: String,
    /// 역할 ("Admin" | "Author" | "Guest", 생략 시 Guest)
    #[serde(default)]
    #[validate(length(max = 50, message = "역할은 50자를 넘을 수 없습니다"))]
    pub role: Option<String>,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginAuthorRequest {
    #[validate(
        email(message = "올바른 이메일 형식이 아닙니다"),
        length(max = 256, message = "이메일은 256자를 넘을 수 없습니다")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "비밀번호는 6자 이상이어야 합니다"))]
    pub password: String,
}

/// 작성자 수정 요청.
///
/// 이름/이메일/비밀번호는 항상 교체됩니다. 역할은 관리자 요청일 때만 반영됩니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    #[validate(length(min = 1, max = 50, message = "작성자 이름은 1-50자여야 합니다"))]
    pub author_name: String,
    #[validate(
        email(message = "올바른 이메일 형식이 아닙니다"),
        length(max = 256, message = "이메일은 256자를 넘을 수 없습니다")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "비밀번호는 6자 이상이어야 합니다"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "역할은 50자를 넘을 수 없습니다"))]
    pub role: Option<String>,
}

/// 인증 성공 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: i32,
    pub author_name: String,
    pub email: String,
    pub role: String,
    /// Bearer 토큰
    pub token: String,
}

impl AuthResponse {
    fn new(author: &Author, token: String) -> Self {
        Self {
            id: author.id,
            author_name: author.author_name.clone(),
            email: author.email.clone(),
            role: author.role.to_string(),
            token,
        }
    }
}

/// 요청 본문의 역할 문자열 해석 (알 수 없는 값은 Guest).
fn requested_role(role: Option<&str>) -> Option<Role> {
    role.map(Role::from_stored)
}

/// 토큰 발급.
fn issue_token(state: &AppState, author: &Author) -> ApiResult<String> {
    state
        .token_issuer
        .issue(&author.claims())
        .map_err(|e| internal_error("Failed to sign token", e))
}

/// 존재하지 않으면 404.
async fn load_author(state: &AppState, id: i32) -> ApiResult<Author> {
    state
        .store
        .find_by_id(id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| author_not_found(id))
}

// ==================== 핸들러 ====================

/// 회원가입.
///
/// 요청의 `role`은 검사 없이 저장되므로 누구나 관리자로 가입할 수 있습니다.
/// 수정 요청의 역할 보호([`policy::resolve_role_change`])는 가입 경로에 적용되지 않습니다.
#[utoipa::path(
    post,
    path = "/api/authors/register",
    tag = "authors",
    request_body = RegisterAuthorRequest,
    responses(
        (status = 200, description = "가입 성공 (요청한 역할이 그대로 부여됨, Admin 포함)", body = AuthResponse),
        (status = 400, description = "입력 오류 또는 이메일 중복", body = ApiErrorResponse)
    )
)]
pub async fn register_author(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterAuthorRequest>,
) -> ApiResult<Json<AuthResponse>> {
    request.validate().map_err(|e| validation_error(&e))?;

    if state
        .store
        .email_taken(&request.email, None)
        .await
        .map_err(store_error)?
    {
        return Err(email_exists());
    }

    let credential = state
        .hasher
        .hash(&request.password)
        .map_err(|e| internal_error("Failed to hash password", e))?;

    let author = state
        .store
        .create(NewAuthor {
            author_name: request.author_name,
            email: request.email,
            credential,
            role: requested_role(request.role.as_deref()).unwrap_or_default(),
        })
        .await
        .map_err(store_error)?;

    let token = issue_token(&state, &author)?;
    info!(author_id = author.id, role = %author.role, "Author registered");

    Ok(Json(AuthResponse::new(&author, token)))
}

/// 로그인.
///
/// 이메일이 없는 경우와 비밀번호가 틀린 경우 같은 응답을 반환합니다.
#[utoipa::path(
    post,
    path = "/api/authors/login",
    tag = "authors",
    request_body = LoginAuthorRequest,
    responses(
        (status = 200, description = "로그인 성공", body = AuthResponse),
        (status = 400, description = "입력 오류", body = ApiErrorResponse),
        (status = 401, description = "이메일 또는 비밀번호 불일치", body = ApiErrorResponse)
    )
)]
pub async fn login_author(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginAuthorRequest>,
) -> ApiResult<Json<AuthResponse>> {
    request.validate().map_err(|e| validation_error(&e))?;

    let author = state
        .store
        .find_by_email(&request.email)
        .await
        .map_err(store_error)?
        .ok_or_else(invalid_credentials)?;

    if !state
        .hasher
        .verify(&request.password, &author.password_hash, &author.password_salt)
    {
        debug!(author_id = author.id, "Login rejected");
        return Err(invalid_credentials());
    }

    if state.hasher.needs_rehash(&author.password_salt) {
        // 실패해도 로그인은 진행하고 다음 로그인 때 다시 시도
        match state.hasher.hash(&request.password) {
            Ok(credential) => match state.store.update_credential(author.id, credential).await {
                Ok(()) => info!(
                    author_id = author.id,
                    scheme = ?state.hasher.scheme(),
                    "Password rehashed"
                ),
                Err(e) => warn!(author_id = author.id, error = %e, "Failed to store rehashed password"),
            },
            Err(e) => warn!(author_id = author.id, error = %e, "Failed to rehash password"),
        }
    }

    let token = issue_token(&state, &author)?;
    info!(author_id = author.id, "Author logged in");

    Ok(Json(AuthResponse::new(&author, token)))
}

/// 전체 작성자 목록 (관리자 전용).
#[utoipa::path(
    get,
    path = "/api/authors",
    tag = "authors",
    responses(
        (status = 200, description = "작성자 목록", body = Vec<AuthorSummary>),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "관리자 아님", body = ApiErrorResponse)
    )
)]
pub async fn list_authors(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
) -> ApiResult<Json<Vec<AuthorSummary>>> {
    policy::authorize_list_all(&claims).map_err(forbidden)?;

    let authors = state.store.list().await.map_err(store_error)?;
    Ok(Json(authors.iter().map(Author::summary).collect()))
}

/// 작성자 단건 조회 (본인 또는 관리자).
#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "작성자 ID")),
    responses(
        (status = 200, description = "작성자 정보", body = AuthorSummary),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "접근 권한 없음", body = ApiErrorResponse),
        (status = 404, description = "작성자 없음", body = ApiErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(id): Path<i32>,
) -> ApiResult<Json<AuthorSummary>> {
    let author = load_author(&state, id).await?;
    policy::authorize_read(&claims, id).map_err(forbidden)?;

    Ok(Json(author.summary()))
}

/// 작성자 수정 (본인 또는 관리자).
#[utoipa::path(
    patch,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "작성자 ID")),
    request_body = UpdateAuthorRequest,
    responses(
        (status = 204, description = "수정 완료"),
        (status = 400, description = "입력 오류 또는 이메일 중복", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "접근 권한 없음", body = ApiErrorResponse),
        (status = 404, description = "작성자 없음", body = ApiErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(id): Path<i32>,
    Json(request): Json<UpdateAuthorRequest>,
) -> ApiResult<StatusCode> {
    request.validate().map_err(|e| validation_error(&e))?;

    let author = load_author(&state, id).await?;
    policy::authorize_update(&claims, id).map_err(forbidden)?;

    if state
        .store
        .email_taken(&request.email, Some(id))
        .await
        .map_err(store_error)?
    {
        return Err(email_exists());
    }

    let role = policy::resolve_role_change(
        &claims,
        author.role,
        requested_role(request.role.as_deref()),
    );
    let credential = state
        .hasher
        .hash(&request.password)
        .map_err(|e| internal_error("Failed to hash password", e))?;

    state
        .store
        .update(
            id,
            AuthorChanges {
                author_name: request.author_name,
                email: request.email,
                credential,
                role,
            },
        )
        .await
        .map_err(store_error)?;

    info!(author_id = id, caller_id = claims.subject_id, role = %role, "Author updated");
    Ok(StatusCode::NO_CONTENT)
}

/// 작성자 삭제 (본인 또는 관리자).
#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "작성자 ID")),
    responses(
        (status = 204, description = "삭제 완료"),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "접근 권한 없음", body = ApiErrorResponse),
        (status = 404, description = "작성자 없음", body = ApiErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    load_author(&state, id).await?;
    policy::authorize_delete(&claims, id).map_err(forbidden)?;

    if !state.store.delete(id).await.map_err(store_error)? {
        return Err(author_not_found(id));
    }

    info!(author_id = id, caller_id = claims.subject_id, "Author deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// 작성자 라우터 생성.
pub fn authors_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_authors))
        .route("/register", post(register_author))
        .route("/login", post(login_author))
        .route(
            "/{id}",
            get(get_author).patch(update_author).delete(delete_author),
        )
}
