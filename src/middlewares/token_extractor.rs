//! 요청 헤더에서 베어러 토큰 추출

use actix_web::http::header::{HeaderMap, AUTHORIZATION};

/// 토큰이 없거나 스킴이 맞지 않으면 `None`을 반환합니다. 에러가 아니라 미인증 상태입니다.
pub trait TokenExtractor: Send + Sync {
    fn extract(&self, headers: &HeaderMap) -> Option<String>;
}

/// `Authorization: Bearer {token}` 형식의 추출기
pub struct BearerTokenExtractor;

impl TokenExtractor for BearerTokenExtractor {
    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let (scheme, token) = value.trim().split_once(' ')?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }

        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}
