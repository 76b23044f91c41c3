//! 애플리케이션 상태
//!
//! 시작 시 한 번 조립되는 인증 구성 요소 묶음입니다. `web::Data<AppState>`로
//! 핸들러에 공유되며, 인증 필터도 여기서 생성합니다.
//!
//! 전역 싱글톤 레지스트리(ServiceLocator)를 대신합니다. 구성 요소는 `main`에서
//! 한 번만 생성되고, 워커마다 복제되는 `AppState`는 같은 `Arc` 인스턴스를 가리킵니다.
//! 테스트는 `AppState::new`에 원하는 저장소를 넣어 독립된 상태를 만듭니다.

use std::sync::Arc;
use chrono::Duration;
use crate::config::RefreshTokenConfig;
use crate::middlewares::{
    AuthenticationEntryPoint, AuthenticationFilter, BearerTokenExtractor, ContextManager,
    JsonAuthenticationEntryPoint, RequestContextManager, TokenExtractor,
};
use crate::repositories::tokens::TokenFamilyStore;
use crate::services::auth::{
    AuthenticationService, RefreshRotationService, Sha256TokenHasher, TokenAuthenticationService,
    TokenCodec, TokenHasher,
};

#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub rotation: Arc<RefreshRotationService>,
    pub authentication: Arc<dyn AuthenticationService>,
    pub token_extractor: Arc<dyn TokenExtractor>,
    pub context_manager: Arc<dyn ContextManager>,
    pub entry_point: Arc<dyn AuthenticationEntryPoint>,
}

impl AppState {
    /// 기본 구현체(베어러 추출기, 클레임 기반 인증, 요청 extensions 컨텍스트, JSON 진입점)로 조립합니다.
    pub fn new(
        codec: Arc<TokenCodec>,
        hasher: Arc<dyn TokenHasher>,
        store: Arc<dyn TokenFamilyStore>,
        refresh_ttl: Duration,
    ) -> Self {
        let rotation = RefreshRotationService::new(codec.clone(), hasher, store, refresh_ttl);
        let authentication = TokenAuthenticationService::with_claims_resolver(codec.clone());

        Self {
            codec,
            rotation: Arc::new(rotation),
            authentication: Arc::new(authentication),
            token_extractor: Arc::new(BearerTokenExtractor),
            context_manager: Arc::new(RequestContextManager),
            entry_point: Arc::new(JsonAuthenticationEntryPoint),
        }
    }

    /// 환경 변수 설정으로 조립합니다.
    pub fn from_config(store: Arc<dyn TokenFamilyStore>) -> Self {
        Self::new(
            Arc::new(TokenCodec::from_config()),
            Arc::new(Sha256TokenHasher::from_config()),
            store,
            Duration::days(RefreshTokenConfig::expiration_days()),
        )
    }

    pub fn authentication_filter(&self) -> AuthenticationFilter {
        AuthenticationFilter::new(
            self.token_extractor.clone(),
            self.authentication.clone(),
            self.context_manager.clone(),
            self.entry_point.clone(),
        )
    }
}
