//! JWT 액세스 토큰 코덱
//!
//! HMAC-SHA256으로 서명된 액세스 토큰을 발급하고 검증합니다.
//! 서명되는 클레임은 `{sub, userId, userNickname, roles, iat, exp}`이며,
//! 만료 판정에 허용 오차(leeway)를 두지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use crate::config::JwtConfig;
use crate::core::auth_error::{AuthError, TokenFailureReason};
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::token::TokenClaims;

/// 토큰에 실제로 서명되는 페이로드
#[derive(Debug, Serialize, Deserialize)]
struct AccessTokenPayload {
    sub: String,
    #[serde(flatten)]
    claims: TokenClaims,
    iat: i64,
    exp: i64,
}

/// JWT 토큰 코덱
///
/// 서명 키와 액세스 토큰 수명을 보관합니다. 상태가 없으므로 `Arc`로 공유해 사용합니다.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, access_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
        }
    }

    /// 환경 변수 설정(`JWT_SECRET`, `JWT_ACCESS_TOKEN_MINUTES`)으로 코덱을 생성합니다.
    pub fn from_config() -> Self {
        Self::new(
            &JwtConfig::secret(),
            Duration::minutes(JwtConfig::access_token_minutes()),
        )
    }

    /// 액세스 토큰 수명 (초)
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// 클레임에 서명하여 액세스 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 인코딩 실패
    pub fn issue(&self, claims: &TokenClaims) -> AppResult<String> {
        let now = Utc::now();
        let payload = AccessTokenPayload {
            sub: claims.user_id.to_string(),
            claims: claims.clone(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 서명과 만료를 모두 검증하고 클레임을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidAccessToken(Expired)` - 만료된 토큰
    /// * `AuthError::InvalidAccessToken(SignatureMismatch)` - 서명 불일치
    /// * `AuthError::InvalidAccessToken(Malformed)` - 그 밖의 형식 오류
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.decode_with(token, true)
    }

    /// 서명만 검증하고 만료는 무시합니다.
    ///
    /// 토큰 갱신 요청에서 만료된 액세스 토큰으로부터 계정 ID를 얻을 때 사용합니다.
    pub fn verify_allow_expired(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.decode_with(token, false)
    }

    fn decode_with(&self, token: &str, validate_exp: bool) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = validate_exp;

        decode::<AccessTokenPayload>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenFailureReason::Expired,
                    ErrorKind::InvalidSignature => TokenFailureReason::SignatureMismatch,
                    _ => TokenFailureReason::Malformed,
                };
                log::debug!("액세스 토큰 검증 실패: {} ({})", reason, e);
                AuthError::InvalidAccessToken(reason)
            })
    }
}
