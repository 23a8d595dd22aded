//! 비밀번호 해싱 유틸리티.
//!
//! 솔트를 키로 사용하는 HMAC-SHA-512 해싱(기본값, 기존 자격증명과 호환)과
//! 선택적인 Argon2id 해싱을 제공합니다.
//!
//! HMAC-SHA-512 방식에는 작업 계수(반복 횟수)가 없습니다. 저장된 자격증명과의
//! 호환을 위해 기본값으로 유지하며, 운영자는 `auth.hash_scheme = "argon2id"`로
//! 전환할 수 있습니다. 검증 시 솔트 길이로 방식을 판별하므로 두 방식의
//! 자격증명이 공존할 수 있습니다.

use argon2::Argon2;
use blog_core::HashScheme;
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;
use subtle::ConstantTimeEq;

type HmacSha512 = Hmac<Sha512>;

/// HMAC-SHA-512 솔트(키) 길이 (바이트).
pub const HMAC_SALT_LEN: usize = 128;

/// HMAC-SHA-512 해시 길이 (바이트).
pub const HMAC_HASH_LEN: usize = 64;

/// Argon2id 솔트 길이 (바이트).
pub const ARGON2_SALT_LEN: usize = 16;

/// Argon2id 해시 길이 (바이트).
pub const ARGON2_HASH_LEN: usize = 32;

/// 저장용 자격증명 (해시 + 솔트).
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("password_hash", &format_args!("<{} bytes>", self.password_hash.len()))
            .field("password_salt", &format_args!("<{} bytes>", self.password_salt.len()))
            .finish()
    }
}

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// OS 난수 생성기 실패 (복구 불가)
    #[error("엔트로피 소스 실패: {0}")]
    EntropyFailure(String),
    /// Argon2 키 유도 실패
    #[error("키 유도 실패: {0}")]
    Kdf(String),
}

/// 비밀번호 해셔.
///
/// 상태가 없으므로 복사해서 공유합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialHasher {
    scheme: HashScheme,
}

impl CredentialHasher {
    pub fn new(scheme: HashScheme) -> Self {
        Self { scheme }
    }

    /// 새 비밀번호에 사용되는 해시 방식.
    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// 비밀번호 해싱.
    ///
    /// 매 호출마다 OS 난수 생성기에서 새 솔트를 만듭니다.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let credential = hasher.hash("my_secure_password")?;
    /// assert_eq!(credential.password_salt.len(), HMAC_SALT_LEN);
    /// ```
    pub fn hash(&self, password: &str) -> Result<Credential, HashError> {
        match self.scheme {
            HashScheme::HmacSha512 => {
                let salt = random_salt(HMAC_SALT_LEN)?;
                let hash = hmac_sha512(password, &salt).finalize().into_bytes().to_vec();
                Ok(Credential {
                    password_hash: hash,
                    password_salt: salt,
                })
            }
            HashScheme::Argon2id => {
                let salt = random_salt(ARGON2_SALT_LEN)?;
                let hash = argon2id(password, &salt)?;
                Ok(Credential {
                    password_hash: hash,
                    password_salt: salt,
                })
            }
        }
    }

    /// 비밀번호 검증.
    ///
    /// 저장된 솔트로 다이제스트를 다시 계산해 상수 시간으로 비교합니다.
    /// 길이가 맞지 않으면 에러 없이 `false`를 반환합니다.
    pub fn verify(&self, password: &str, hash: &[u8], salt: &[u8]) -> bool {
        match scheme_of(salt) {
            HashScheme::HmacSha512 => hmac_sha512(password, salt).verify_slice(hash).is_ok(),
            HashScheme::Argon2id => match argon2id(password, salt) {
                Ok(computed) => constant_time_eq(&computed, hash),
                Err(_) => false,
            },
        }
    }

    /// 저장된 자격증명이 현재 설정과 다른 방식이면 `true`.
    pub fn needs_rehash(&self, salt: &[u8]) -> bool {
        scheme_of(salt) != self.scheme
    }
}

/// 솔트 길이로 해시 방식 판별.
///
/// HMAC 키는 길이 제한이 없으므로 Argon2 솔트 길이가 아니면 HMAC으로 봅니다.
fn scheme_of(salt: &[u8]) -> HashScheme {
    if salt.len() == ARGON2_SALT_LEN {
        HashScheme::Argon2id
    } else {
        HashScheme::HmacSha512
    }
}

fn random_salt(len: usize) -> Result<Vec<u8>, HashError> {
    let mut salt = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| HashError::EntropyFailure(e.to_string()))?;
    Ok(salt)
}

fn hmac_sha512(password: &str, key: &[u8]) -> HmacSha512 {
    // HMAC은 임의 길이 키를 허용하므로 실패하지 않음
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(password.as_bytes());
    mac
}

fn argon2id(password: &str, salt: &[u8]) -> Result<Vec<u8>, HashError> {
    let mut out = vec![0u8; ARGON2_HASH_LEN];
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| HashError::Kdf(e.to_string()))?;
    Ok(out)
}

/// 길이가 다르면 `false`. 내용 비교는 `subtle`로 상수 시간 수행.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hasher = CredentialHasher::default();
        let password = "TestPassword123!";
        let credential = hasher.hash(password).unwrap();

        assert_eq!(credential.password_salt.len(), HMAC_SALT_LEN);
        assert_eq!(credential.password_hash.len(), HMAC_HASH_LEN);

        assert!(hasher.verify(password, &credential.password_hash, &credential.password_salt));
        assert!(!hasher.verify(
            "WrongPassword123!",
            &credential.password_hash,
            &credential.password_salt
        ));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = CredentialHasher::default();
        let first = hasher.hash("Password1").unwrap();
        let second = hasher.hash("Password1").unwrap();

        // 같은 비밀번호라도 솔트가 다르므로 해시가 다름
        assert_ne!(first.password_salt, second.password_salt);
        assert_ne!(first.password_hash, second.password_hash);

        assert!(hasher.verify("Password1", &first.password_hash, &first.password_salt));
        assert!(hasher.verify("Password1", &second.password_hash, &second.password_salt));
    }

    #[test]
    fn test_mismatched_lengths_return_false() {
        let hasher = CredentialHasher::default();
        let credential = hasher.hash("secret99").unwrap();

        assert!(!hasher.verify("secret99", &credential.password_hash[..10], &credential.password_salt));
        assert!(!hasher.verify("secret99", &[], &credential.password_salt));
        assert!(!hasher.verify("secret99", &credential.password_hash, &[]));
    }

    #[test]
    fn test_known_hmac_vector() {
        // RFC 4231 테스트 케이스 2 (HMAC-SHA-512, key = "Jefe")
        let expected = [
            0x16, 0x4b, 0x7a, 0x7b, 0xfc, 0xf8, 0x19, 0xe2, 0xe3, 0x95, 0xfb, 0xe7, 0x3b, 0x56,
            0xe0, 0xa3, 0x87, 0xbd, 0x64, 0x22, 0x2e, 0x83, 0x1f, 0xd6, 0x10, 0x27, 0x0c, 0xd7,
            0xea, 0x25, 0x05, 0x54, 0x97, 0x58, 0xbf, 0x75, 0xc0, 0x5a, 0x99, 0x4a, 0x6d, 0x03,
            0x4f, 0x65, 0xf8, 0xf0, 0xe6, 0xfd, 0xca, 0xea, 0xb1, 0xa3, 0x4d, 0x4a, 0x6b, 0x4b,
            0x63, 0x6e, 0x07, 0x0a, 0x38, 0xbc, 0xe7, 0x37,
        ];
        let hasher = CredentialHasher::default();
        assert!(hasher.verify("what do ya want for nothing?", &expected, b"Jefe"));
    }

    #[test]
    fn test_argon2_scheme() {
        let hasher = CredentialHasher::new(HashScheme::Argon2id);
        let credential = hasher.hash("한글패스워드123").unwrap();

        assert_eq!(credential.password_salt.len(), ARGON2_SALT_LEN);
        assert_eq!(credential.password_hash.len(), ARGON2_HASH_LEN);
        assert!(hasher.verify("한글패스워드123", &credential.password_hash, &credential.password_salt));
        assert!(!hasher.verify("다른패스워드", &credential.password_hash, &credential.password_salt));
    }

    #[test]
    fn test_verify_detects_scheme_from_salt() {
        let legacy = CredentialHasher::new(HashScheme::HmacSha512);
        let upgraded = CredentialHasher::new(HashScheme::Argon2id);

        let old = legacy.hash("password1").unwrap();
        // Argon2id로 전환한 뒤에도 기존 HMAC 자격증명 검증 가능
        assert!(upgraded.verify("password1", &old.password_hash, &old.password_salt));
        assert!(upgraded.needs_rehash(&old.password_salt));
        assert!(!legacy.needs_rehash(&old.password_salt));

        let new = upgraded.hash("password1").unwrap();
        assert!(legacy.verify("password1", &new.password_hash, &new.password_salt));
        assert!(!upgraded.needs_rehash(&new.password_salt));
    }

    #[test]
    fn test_nonstandard_salt_verifies_as_hmac() {
        let hasher = CredentialHasher::default();
        for len in [0usize, 32, 64, 200] {
            let salt = vec![7u8; len];
            let hash = hmac_sha512("password1", &salt).finalize().into_bytes().to_vec();

            assert!(hasher.verify("password1", &hash, &salt));
            assert!(!hasher.verify("password2", &hash, &salt));
            assert!(!hasher.verify("password1", &hash[..32], &salt));
        }
    }

    #[test]
    fn test_debug_hides_bytes() {
        let credential = CredentialHasher::default().hash("password1").unwrap();
        let debug = format!("{:?}", credential);
        assert!(debug.contains("<64 bytes>"));
        assert!(debug.contains("<128 bytes>"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(constant_time_eq(b"", b""));
        assert!(!constant_time_eq(&[0u8; 32], &[0u8; 31]));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_hash_then_verify(password in ".{0,64}") {
            let hasher = CredentialHasher::default();
            let credential = hasher.hash(&password).unwrap();
            prop_assert!(hasher.verify(&password, &credential.password_hash, &credential.password_salt));
        }

        #[test]
        fn prop_other_password_rejected(a in ".{1,32}", b in ".{1,32}") {
            prop_assume!(a != b);
            let hasher = CredentialHasher::default();
            let credential = hasher.hash(&b).unwrap();
            prop_assert!(!hasher.verify(&a, &credential.password_hash, &credential.password_salt));
        }
    }
}
