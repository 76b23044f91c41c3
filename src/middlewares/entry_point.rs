//! 인증 실패 응답 생성

use actix_web::HttpResponse;
use crate::core::auth_error::AuthError;
use crate::core::errors::AppError;

/// 인증 필터가 요청을 차단할 때 응답을 만드는 진입점
pub trait AuthenticationEntryPoint: Send + Sync {
    fn commence(&self, path: &str, error: &AuthError) -> HttpResponse;
}

/// `{code, message, detail, timestamp, path}` JSON 본문으로 응답합니다.
pub struct JsonAuthenticationEntryPoint;

impl AuthenticationEntryPoint for JsonAuthenticationEntryPoint {
    fn commence(&self, path: &str, error: &AuthError) -> HttpResponse {
        let body = AppError::from(error.clone()).to_error_response(Some(path.to_string()));
        HttpResponse::build(error.status_code()).json(body)
    }
}
