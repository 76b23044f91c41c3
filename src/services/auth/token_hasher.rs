//! 리프레시 토큰 다이제스트
//!
//! 저장소에는 리프레시 토큰 원문 대신 SHA-256 다이제스트(소문자 16진수)만 기록합니다.
//! 같은 입력은 항상 같은 다이제스트를 만들어야 조회/비교가 가능합니다.

use sha2::{Digest, Sha256};
use crate::config::RefreshTokenConfig;
use crate::core::auth_error::AuthError;

/// 토큰 해셔 trait
///
/// 구현체는 결정적이어야 합니다. 실패는 `AuthError::TokenHashingFailed`로 보고하며,
/// 이 에러는 인증 실패가 아닌 내부 오류(500)로 취급됩니다.
pub trait TokenHasher: Send + Sync {
    fn hash(&self, raw_token: &str) -> Result<String, AuthError>;
}

/// SHA-256 기반 해셔
///
/// 설정된 pepper가 있으면 토큰 앞에 붙여 해싱합니다.
pub struct Sha256TokenHasher {
    pepper: String,
}

impl Sha256TokenHasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    /// `REFRESH_TOKEN_PEPPER` 환경 변수로 생성
    pub fn from_config() -> Self {
        Self::new(RefreshTokenConfig::pepper())
    }
}

impl TokenHasher for Sha256TokenHasher {
    fn hash(&self, raw_token: &str) -> Result<String, AuthError> {
        if raw_token.is_empty() {
            return Err(AuthError::TokenHashingFailed("빈 토큰은 해싱할 수 없습니다".to_string()));
        }

        let mut hasher = Sha256::new();
        hasher.update(self.pepper.as_bytes());
        hasher.update(raw_token.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// 다이제스트를 상수 시간에 비교합니다.
pub fn digests_match(left: &str, right: &str) -> bool {
    if left.len() != right.len() {
        return false;
    }

    left.bytes()
        .zip(right.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
