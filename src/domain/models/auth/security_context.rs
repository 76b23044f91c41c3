use crate::domain::models::auth::authenticated_user::AuthenticatedUser;

/// 요청 단위 보안 컨텍스트
///
/// 요청 객체의 extensions에 저장되어 그 요청의 처리 체인을 따라서만 전달됩니다.
/// 전역 상태가 아니므로 동시에 처리되는 요청 사이에 공유되지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    authentication: Option<AuthenticatedUser>,
}

impl SecurityContext {
    pub fn authenticated(user: AuthenticatedUser) -> Self {
        Self {
            authentication: Some(user),
        }
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.authentication.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authentication.is_some()
    }
}
