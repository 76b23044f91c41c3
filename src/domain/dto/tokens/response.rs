use std::collections::BTreeSet;
use chrono::Utc;
use serde::Serialize;
use crate::domain::models::auth::AuthenticatedUser;

/// API 응답 래퍼
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// 에러 응답 본문
///
/// 인증 실패 응답과 일반 에러 응답이 같은 형식을 사용합니다.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// 기계가 읽는 에러 코드 (예: `TOKEN_REUSE_DETECTED`)
    pub code: String,
    pub message: String,
    /// 상세 정보. 5xx 응답에서는 내부 정보를 노출하지 않도록 비워 둡니다.
    pub detail: Option<String>,
    /// RFC 3339 형식
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: String, detail: Option<String>, path: Option<String>) -> Self {
        Self {
            code: code.to_string(),
            message,
            detail,
            timestamp: Utc::now().to_rfc3339(),
            path,
        }
    }
}

/// 현재 인증된 사용자 정보 응답
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user_id: i64,
    pub nickname: String,
    pub email: Option<String>,
    pub roles: BTreeSet<String>,
    pub provider: String,
}

impl From<&AuthenticatedUser> for CurrentUserResponse {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id(),
            nickname: user.nickname().to_string(),
            email: user.email().map(str::to_string),
            roles: user.roles().clone(),
            provider: user.provider().as_str().to_string(),
        }
    }
}

/// 폐기/정리 작업 결과
#[derive(Debug, Serialize)]
pub struct RevocationResponse {
    pub affected: u64,
}
