//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::repository::AuthorSummary;
use crate::routes::{
    AuthResponse, ComponentHealth, ComponentStatus, HealthResponse, LoginAuthorRequest,
    RegisterAuthorRequest, UpdateAuthorRequest,
};

/// Blog API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Author API",
        description = r#"
# 블로그 작성자 REST API

작성자 가입, 로그인, 조회/수정/삭제를 위한 REST API입니다.

## 인증

가입/로그인을 제외한 작성자 엔드포인트는 Bearer 토큰이 필요합니다.
`Authorization: Bearer <token>` 헤더를 포함하세요.

## 권한

- 전체 목록: 관리자 전용
- 단건 조회/수정/삭제: 본인 또는 관리자
- 역할 변경: 관리자 전용 (그 외 요청의 역할 값은 무시)

## 주의: 가입 시 역할

`POST /api/authors/register`는 요청 본문의 `role`을 그대로 저장합니다.
누구나 `"role": "Admin"`으로 가입해 관리자 권한을 얻을 수 있으므로,
공개 환경에서는 게이트웨이 등에서 가입 요청의 `role` 필드를 차단해야 합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "authors", description = "작성자 - 가입/로그인/관리")
    ),
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,

            // ===== Authors =====
            RegisterAuthorRequest,
            LoginAuthorRequest,
            UpdateAuthorRequest,
            AuthResponse,
            AuthorSummary,
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        crate::routes::authors::register_author,
        crate::routes::authors::login_author,
        crate::routes::authors::list_authors,
        crate::routes::authors::get_author,
        crate::routes::authors::update_author,
        crate::routes::authors::delete_author,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
