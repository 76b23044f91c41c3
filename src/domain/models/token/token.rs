//! JWT 클레임과 토큰 발급 결과
//!
//! 액세스 토큰에 서명되어 들어가는 클레임 집합은 `{userId, userNickname, roles}`로 고정되어 있습니다.
use std::collections::BTreeSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 액세스 토큰에 포함되는 사용자 클레임
///
/// 발급 이후에는 변경되지 않습니다. `roles`는 정렬된 집합이라
/// 같은 클레임은 항상 같은 JSON으로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// 사용자 ID
    pub user_id: i64,
    /// 사용자 닉네임
    pub user_nickname: String,
    /// 사용자 역할 목록
    pub roles: BTreeSet<String>,
}

impl TokenClaims {
    pub fn new<I, S>(user_id: i64, user_nickname: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id,
            user_nickname: user_nickname.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// 토큰 발급/회전 결과
///
/// OAuth 2.0 표준의 토큰 응답 형식을 따릅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefreshResult {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (1회용, 다음 회전에 사용)
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
    pub token_type: String,
}

impl TokenRefreshResult {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
            token_type: "Bearer".to_string(),
        }
    }
}

/// 회전 과정에서 사용하는 패밀리 행의 값 뷰
///
/// `id`는 패밀리 행 ID, `family_id`는 계보(lineage) ID입니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshTokenEntity {
    pub id: Uuid,
    pub family_id: Uuid,
    pub used: bool,
    pub expires_at: DateTime<Utc>,
}
