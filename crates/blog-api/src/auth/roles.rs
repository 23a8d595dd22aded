//! 역할 기반 접근 제어 (RBAC).
//!
//! 작성자 역할 정의.

use serde::{Deserialize, Serialize};

/// 작성자 역할.
///
/// 저장소와 토큰에는 `"Admin"`, `"Author"`, `"Guest"` 문자열로 기록됩니다.
/// 알 수 없는 값은 최소 권한인 [`Role::Guest`]로 취급합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// 관리자 - 모든 작성자 조회/수정, 역할 변경 가능
    Admin,
    /// 작성자 - 본인 정보만 접근
    Author,
    /// 게스트 - 본인 정보만 접근 (기본값)
    #[default]
    Guest,
}

impl Role {
    /// 저장된 문자열에서 역할 파싱 (대소문자 무시).
    ///
    /// 알 수 없는 값은 `Guest`로 떨어집니다.
    pub fn from_stored(s: &str) -> Self {
        Self::parse(s).unwrap_or(Role::Guest)
    }

    /// 문자열에서 역할 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "author" => Some(Role::Author),
            "guest" => Some(Role::Guest),
            _ => None,
        }
    }

    /// 저장/직렬화용 표기.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Author => "Author",
            Role::Guest => "Guest",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from_stored(&s)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("AUTHOR"), Some(Role::Author));
        assert_eq!(Role::parse(" guest "), Some(Role::Guest));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn test_unknown_role_is_guest() {
        assert_eq!(Role::from_stored("Editor"), Role::Guest);
        assert_eq!(Role::from_stored(""), Role::Guest);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"Admin\"");

        let parsed: Role = serde_json::from_str("\"author\"").unwrap();
        assert_eq!(parsed, Role::Author);

        let unknown: Role = serde_json::from_str("\"Moderator\"").unwrap();
        assert_eq!(unknown, Role::Guest);
    }

    #[test]
    fn test_only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Author.is_admin());
        assert!(!Role::Guest.is_admin());
    }
}
