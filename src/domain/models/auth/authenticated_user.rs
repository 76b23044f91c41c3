use std::collections::BTreeSet;
use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;
use crate::config::AuthProvider;
use crate::core::auth_error::AuthError;
use crate::core::errors::AppError;
use crate::domain::models::auth::security_context::SecurityContext;
use crate::domain::models::token::TokenClaims;

/// 로컬 계정으로 식별된 사용자
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalUser {
    pub user_id: i64,
    pub nickname: String,
    pub email: Option<String>,
    pub roles: BTreeSet<String>,
    pub active: bool,
}

/// OAuth 프로바이더를 통해 식별된 사용자
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuthUser {
    pub user_id: i64,
    pub nickname: String,
    pub email: Option<String>,
    pub provider: AuthProvider,
    pub roles: BTreeSet<String>,
    pub active: bool,
}

/// 인증된 사용자
///
/// 신원 출처별 변형을 하나의 열거형으로 묶고, 공통 접근자
/// (`user_id`, `email`, `roles`, `is_active`)를 제공합니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthenticatedUser {
    Local(LocalUser),
    #[serde(rename = "oauth")]
    OAuth(OAuthUser),
}

impl AuthenticatedUser {
    /// 토큰 클레임만으로 로컬 사용자를 구성합니다. 클레임이 검증되었다면 활성 상태로 간주합니다.
    pub fn from_claims(claims: &TokenClaims) -> Self {
        AuthenticatedUser::Local(LocalUser {
            user_id: claims.user_id,
            nickname: claims.user_nickname.clone(),
            email: None,
            roles: claims.roles.clone(),
            active: true,
        })
    }

    pub fn user_id(&self) -> i64 {
        match self {
            AuthenticatedUser::Local(user) => user.user_id,
            AuthenticatedUser::OAuth(user) => user.user_id,
        }
    }

    pub fn nickname(&self) -> &str {
        match self {
            AuthenticatedUser::Local(user) => &user.nickname,
            AuthenticatedUser::OAuth(user) => &user.nickname,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            AuthenticatedUser::Local(user) => user.email.as_deref(),
            AuthenticatedUser::OAuth(user) => user.email.as_deref(),
        }
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        match self {
            AuthenticatedUser::Local(user) => &user.roles,
            AuthenticatedUser::OAuth(user) => &user.roles,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            AuthenticatedUser::Local(user) => user.active,
            AuthenticatedUser::OAuth(user) => user.active,
        }
    }

    pub fn provider(&self) -> AuthProvider {
        match self {
            AuthenticatedUser::Local(_) => AuthProvider::Local,
            AuthenticatedUser::OAuth(user) => user.provider.clone(),
        }
    }

    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.roles().contains(role)
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 인증 필터가 요청 컨텍스트에 사용자를 바인딩하지 않았다면 401을 반환합니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<SecurityContext>()
            .and_then(|context| context.user().cloned());

        match user {
            Some(user) => ready(Ok(user)),
            None => ready(Err(AppError::from(AuthError::MissingCredential).into())),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<SecurityContext>()
            .and_then(|context| context.user().cloned());
        ready(Ok(OptionalUser(user)))
    }
}
