//! 작성자 리소스 접근 정책.
//!
//! 핸들러는 대상 작성자의 존재를 확인한 뒤 이 함수들로 권한을 판정합니다.
//! 거부 결과는 HTTP와 무관한 [`PolicyDenied`]이며, 403 변환은 라우트 계층이 담당합니다.

use super::{Claims, Role};

/// 접근 거부.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("접근 권한이 없습니다")]
pub struct PolicyDenied;

/// 본인 또는 관리자만 허용.
fn self_or_admin(caller: &Claims, target_id: i32) -> Result<(), PolicyDenied> {
    match caller.role {
        Role::Admin => Ok(()),
        Role::Author | Role::Guest if caller.subject_id == target_id => Ok(()),
        Role::Author | Role::Guest => Err(PolicyDenied),
    }
}

/// 작성자 조회 권한.
pub fn authorize_read(caller: &Claims, target_id: i32) -> Result<(), PolicyDenied> {
    self_or_admin(caller, target_id)
}

/// 작성자 수정 권한.
///
/// 역할 변경 여부는 [`resolve_role_change`]로 따로 결정합니다.
pub fn authorize_update(caller: &Claims, target_id: i32) -> Result<(), PolicyDenied> {
    self_or_admin(caller, target_id)
}

/// 작성자 삭제 권한.
pub fn authorize_delete(caller: &Claims, target_id: i32) -> Result<(), PolicyDenied> {
    self_or_admin(caller, target_id)
}

/// 전체 작성자 목록 조회 권한 (관리자 전용).
pub fn authorize_list_all(caller: &Claims) -> Result<(), PolicyDenied> {
    match caller.role {
        Role::Admin => Ok(()),
        Role::Author | Role::Guest => Err(PolicyDenied),
    }
}

/// 수정 요청의 역할 값을 적용할지 결정.
///
/// 관리자가 아니면 요청된 역할은 조용히 무시되고 기존 역할이 유지됩니다.
pub fn resolve_role_change(caller: &Claims, current: Role, requested: Option<Role>) -> Role {
    match (caller.role, requested) {
        (Role::Admin, Some(role)) => role,
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(id: i32, role: Role) -> Claims {
        Claims::new(id, "caller", "caller@example.com", role)
    }

    #[test]
    fn test_read_self_or_admin() {
        assert!(authorize_read(&caller(5, Role::Author), 5).is_ok());
        assert_eq!(authorize_read(&caller(5, Role::Author), 7), Err(PolicyDenied));
        assert!(authorize_read(&caller(1, Role::Admin), 7).is_ok());
        assert!(authorize_read(&caller(3, Role::Guest), 3).is_ok());
        assert_eq!(authorize_read(&caller(3, Role::Guest), 4), Err(PolicyDenied));
    }

    #[test]
    fn test_update_and_delete_follow_read_rule() {
        let author = caller(5, Role::Author);
        let admin = caller(1, Role::Admin);

        assert!(authorize_update(&author, 5).is_ok());
        assert!(authorize_update(&author, 6).is_err());
        assert!(authorize_update(&admin, 6).is_ok());

        assert!(authorize_delete(&author, 5).is_ok());
        assert!(authorize_delete(&author, 6).is_err());
        assert!(authorize_delete(&admin, 6).is_ok());
    }

    #[test]
    fn test_list_all_admin_only() {
        assert!(authorize_list_all(&caller(1, Role::Admin)).is_ok());
        assert!(authorize_list_all(&caller(2, Role::Author)).is_err());
        assert!(authorize_list_all(&caller(3, Role::Guest)).is_err());
    }

    #[test]
    fn test_role_change_only_for_admin() {
        let author = caller(5, Role::Author);
        let admin = caller(1, Role::Admin);

        // 비관리자의 역할 변경 요청은 무시
        assert_eq!(resolve_role_change(&author, Role::Author, Some(Role::Admin)), Role::Author);
        assert_eq!(resolve_role_change(&caller(8, Role::Guest), Role::Guest, Some(Role::Admin)), Role::Guest);

        assert_eq!(resolve_role_change(&admin, Role::Author, Some(Role::Admin)), Role::Admin);
        assert_eq!(resolve_role_change(&admin, Role::Admin, Some(Role::Guest)), Role::Guest);
        assert_eq!(resolve_role_change(&admin, Role::Author, None), Role::Author);
    }
}
