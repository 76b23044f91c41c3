//! 인증 필터의 요청 처리 로직
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use crate::middlewares::auth_middleware::AuthenticationFilter;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthenticationFilterService<S> {
    pub service: Rc<S>,
    pub filter: AuthenticationFilter,
}

impl<S, B> Service<ServiceRequest> for AuthenticationFilterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let filter = self.filter.clone();

        Box::pin(async move {
            let Some(token) = filter.extractor.extract(req.headers()) else {
                log::debug!("인증 토큰 없음, 미인증 상태로 요청 진행: {}", req.path());
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            };

            match filter.authentication.authenticate(&token).await {
                Ok(Some(user)) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id());
                    filter.context.set_authentication(user, &mut req.extensions_mut());
                },
                Ok(None) => {
                    log::debug!("신원 미확인 토큰, 미인증 상태로 요청 진행");
                },
                Err(err) => {
                    filter.context.clear_authentication(&mut req.extensions_mut());

                    // 명시적인 인증 실패만 요청을 차단합니다
                    if let Some(auth_error) = err.as_auth_failure() {
                        log::warn!("인증 실패: {} ({})", auth_error, req.path());
                        let response = filter.entry_point.commence(req.path(), auth_error);
                        let (req, _) = req.into_parts();
                        return Ok(ServiceResponse::new(req, response).map_into_right_body());
                    }

                    log::warn!("인증 처리 중 예기치 않은 오류, 미인증 상태로 요청 진행: {}", err);
                },
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
