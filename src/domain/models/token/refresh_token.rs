//! 리프레시 토큰의 외부 표현
//!
//! 클라이언트가 보관하는 불투명 문자열은 `{family_id}.{secret}` 형식입니다.
//!
//! - `family_id`: 패밀리 행 ID (하이픈 없는 32자리 16진수), 저장소 조회 키
//! - `secret`: OS 난수 생성기에서 얻은 32바이트를 base64url(패딩 없음)로 인코딩한 값
//!
//! 저장소에는 전체 문자열의 다이제스트만 기록됩니다.
use std::fmt;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;
use crate::core::auth_error::{AuthError, TokenFailureReason};

const SECRET_BYTES: usize = 32;

/// 파싱된 리프레시 토큰
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken {
    family_id: Uuid,
    secret: String,
}

impl RefreshToken {
    /// 지정한 패밀리에 대한 새 리프레시 토큰을 생성합니다.
    pub fn generate(family_id: Uuid) -> Self {
        let mut bytes = [0u8; SECRET_BYTES];
        OsRng.fill_bytes(&mut bytes);

        Self {
            family_id,
            secret: URL_SAFE_NO_PAD.encode(bytes),
        }
    }

    /// 클라이언트가 제시한 문자열을 파싱합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidRefreshToken(Malformed)` - 형식이 맞지 않는 경우
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let malformed = || AuthError::InvalidRefreshToken(TokenFailureReason::Malformed);

        let (family_part, secret) = raw.split_once('.').ok_or_else(malformed)?;
        if family_part.len() != 32 || secret.is_empty() {
            return Err(malformed());
        }

        let family_id = Uuid::parse_str(family_part).map_err(|_| malformed())?;
        let decoded = URL_SAFE_NO_PAD.decode(secret).map_err(|_| malformed())?;
        if decoded.len() != SECRET_BYTES {
            return Err(malformed());
        }

        Ok(Self {
            family_id,
            secret: secret.to_string(),
        })
    }

    pub fn family_id(&self) -> Uuid {
        self.family_id
    }

    /// 클라이언트에게 전달하고 다이제스트 계산에 사용하는 문자열 표현
    pub fn encode(&self) -> String {
        format!("{}.{}", self.family_id.simple(), self.secret)
    }
}

// 로그에 비밀값이 남지 않도록 secret은 출력하지 않습니다.
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshToken")
            .field("family_id", &self.family_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_token_parses_back() {
        let family_id = Uuid::new_v4();
        let token = RefreshToken::generate(family_id);
        let encoded = token.encode();

        let parsed = RefreshToken::parse(&encoded).unwrap();
        assert_eq!(parsed.family_id(), family_id);
        assert_eq!(parsed.encode(), encoded);
    }

    #[test]
    fn test_secrets_are_unique() {
        let family_id = Uuid::new_v4();
        assert_ne!(
            RefreshToken::generate(family_id).encode(),
            RefreshToken::generate(family_id).encode()
        );
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let family = Uuid::new_v4().simple().to_string();
        let cases = vec![
            String::new(),
            "no-separator".to_string(),
            format!("{}.", family),
            format!("not-a-uuid-not-a-uuid-not-a-uuid.{}", "A".repeat(43)),
            format!("{}.short", family),
            format!("{}.{}", family, "!".repeat(43)),
        ];

        for raw in cases {
            assert_eq!(
                RefreshToken::parse(&raw),
                Err(AuthError::InvalidRefreshToken(TokenFailureReason::Malformed)),
                "{}",
                raw
            );
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let token = RefreshToken::generate(Uuid::new_v4());
        let debug = format!("{:?}", token);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(&token.secret));
    }
}
