//! 액세스 토큰 인증 서비스
//!
//! 인증 필터는 [`AuthenticationService`]에만 의존합니다. 기본 구현은 토큰 코덱으로
//! 서명을 검증한 뒤 [`IdentityResolver`]로 클레임을 사용자 신원으로 바꿉니다.

use std::sync::Arc;
use async_trait::async_trait;
use crate::core::auth_error::AuthError;
use crate::core::errors::AppResult;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenClaims;
use crate::services::auth::token_codec::TokenCodec;

#[async_trait]
pub trait AuthenticationService: Send + Sync {
    /// 베어러 토큰을 인증합니다.
    ///
    /// * `Ok(Some(user))` - 인증 성공
    /// * `Ok(None)` - 토큰은 유효하지만 신원을 확인할 수 없음 (미인증으로 진행)
    /// * `Err(AppError::Auth(..))` - 인증 실패 (요청 차단)
    /// * 그 밖의 `Err` - 예기치 않은 오류
    async fn authenticate(&self, token: &str) -> AppResult<Option<AuthenticatedUser>>;
}

/// 검증된 클레임을 사용자 신원으로 변환합니다.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, claims: &TokenClaims) -> AppResult<Option<AuthenticatedUser>>;
}

/// 클레임만으로 로컬 사용자를 구성하는 기본 리졸버
pub struct ClaimsIdentityResolver;

#[async_trait]
impl IdentityResolver for ClaimsIdentityResolver {
    async fn resolve(&self, claims: &TokenClaims) -> AppResult<Option<AuthenticatedUser>> {
        Ok(Some(AuthenticatedUser::from_claims(claims)))
    }
}

pub struct TokenAuthenticationService {
    codec: Arc<TokenCodec>,
    resolver: Arc<dyn IdentityResolver>,
}

impl TokenAuthenticationService {
    pub fn new(codec: Arc<TokenCodec>, resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { codec, resolver }
    }

    pub fn with_claims_resolver(codec: Arc<TokenCodec>) -> Self {
        Self::new(codec, Arc::new(ClaimsIdentityResolver))
    }
}

#[async_trait]
impl AuthenticationService for TokenAuthenticationService {
    async fn authenticate(&self, token: &str) -> AppResult<Option<AuthenticatedUser>> {
        let claims = self.codec.verify(token)?;

        let Some(user) = self.resolver.resolve(&claims).await? else {
            log::debug!("신원을 확인할 수 없는 토큰: user_id={}", claims.user_id);
            return Ok(None);
        };

        if !user.is_active() {
            return Err(AuthError::InactiveAccount(user.user_id()).into());
        }

        Ok(Some(user))
    }
}
