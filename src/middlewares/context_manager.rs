//! 요청 단위 인증 컨텍스트 관리

use actix_web::dev::Extensions;
use crate::domain::models::auth::{AuthenticatedUser, SecurityContext};

pub trait ContextManager: Send + Sync {
    fn set_authentication(&self, user: AuthenticatedUser, extensions: &mut Extensions);
    fn clear_authentication(&self, extensions: &mut Extensions);
}

/// 요청 객체의 extensions에 [`SecurityContext`]를 저장하는 기본 구현
///
/// extensions는 요청마다 따로 생성되므로 동시 요청 사이에 인증 정보가 섞이지 않습니다.
pub struct RequestContextManager;

impl ContextManager for RequestContextManager {
    fn set_authentication(&self, user: AuthenticatedUser, extensions: &mut Extensions) {
        extensions.insert(SecurityContext::authenticated(user));
    }

    fn clear_authentication(&self, extensions: &mut Extensions) {
        extensions.remove::<SecurityContext>();
    }
}
