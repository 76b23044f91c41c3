//! 인증 필터 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 베어러 토큰을 인증하고, 결과를 요청 컨텍스트에 바인딩합니다.
//!
//! | 상황 | 동작 |
//! |------|------|
//! | 토큰 없음 | 미인증 상태로 진행 |
//! | 인증 성공 | 컨텍스트에 사용자 바인딩 후 진행 |
//! | 인증 실패 (`AppError::Auth`) | 컨텍스트 해제, 진입점 응답으로 차단 |
//! | 그 밖의 오류 | 컨텍스트 해제, 경고 로그 후 미인증 상태로 진행 |
//!
//! 예기치 않은 오류에서 요청을 계속 진행시키는 동작은 공개 엔드포인트가
//! 선택적 인증 처리 문제로 막히지 않도록 유지되는 정책입니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthenticationFilterService;
use crate::middlewares::context_manager::ContextManager;
use crate::middlewares::entry_point::AuthenticationEntryPoint;
use crate::middlewares::token_extractor::TokenExtractor;
use crate::services::auth::AuthenticationService;

/// 인증 필터
///
/// 협력 객체는 모두 trait 객체로 주입됩니다.
#[derive(Clone)]
pub struct AuthenticationFilter {
    pub(crate) extractor: Arc<dyn TokenExtractor>,
    pub(crate) authentication: Arc<dyn AuthenticationService>,
    pub(crate) context: Arc<dyn ContextManager>,
    pub(crate) entry_point: Arc<dyn AuthenticationEntryPoint>,
}

impl AuthenticationFilter {
    pub fn new(
        extractor: Arc<dyn TokenExtractor>,
        authentication: Arc<dyn AuthenticationService>,
        context: Arc<dyn ContextManager>,
        entry_point: Arc<dyn AuthenticationEntryPoint>,
    ) -> Self {
        Self {
            extractor,
            authentication,
            context,
            entry_point,
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthenticationFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthenticationFilterService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationFilterService {
            service: Rc::new(service),
            filter: self.clone(),
        }))
    }
}
