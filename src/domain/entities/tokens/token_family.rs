//! 리프레시 토큰 패밀리 엔티티
//!
//! 로그인 한 번에서 파생된 리프레시 토큰의 계보(lineage)를 행 단위로 표현합니다.
//! 회전할 때마다 기존 행은 `used`로 표시되고, 새 행이 `previous_family_id`로
//! 이전 행을 가리키며 추가됩니다.
//!
//! ```text
//! login ──▶ F1 (used) ──▶ F2 (used) ──▶ F3 (active)
//!           ▲ previous      ▲ previous
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::models::token::RefreshTokenEntity;

/// 패밀리 행의 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FamilyState {
    /// 아직 사용되지 않은 현재 토큰
    Active,
    /// 회전에 사용되어 후속 행으로 대체됨. 다시 제시되면 재사용 이벤트입니다.
    Consumed,
    /// 재사용 감지, 로그아웃 등으로 폐기됨
    Revoked,
}

/// 리프레시 토큰 패밀리 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenFamily {
    /// 패밀리 행 ID (리프레시 토큰에 포함되는 조회 키)
    pub id: Uuid,
    /// 계보의 첫 패밀리 ID (로그인 시점). 후속 행에 그대로 상속됩니다.
    pub lineage_id: Uuid,
    /// 직전 패밀리 행 ID. 로그인으로 생성된 첫 행은 `None`입니다.
    pub previous_family_id: Option<Uuid>,
    /// 소유 계정 ID
    pub account_id: i64,
    /// 현재 리프레시 토큰 원문의 다이제스트 (원문은 저장하지 않음)
    pub current_token_hash: String,
    pub used: bool,
    pub revoked: bool,
    /// 낙관적 잠금 버전. 상태가 바뀔 때마다 증가합니다.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl TokenFamily {
    /// 로그인/회원가입 시 새 계보의 첫 패밀리를 생성합니다.
    pub fn start(id: Uuid, account_id: i64, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            lineage_id: id,
            previous_family_id: None,
            account_id,
            current_token_hash: token_hash,
            used: false,
            revoked: false,
            version: 0,
            created_at: Utc::now(),
            expires_at,
            used_at: None,
            revoked_at: None,
        }
    }

    /// 회전 시 이 패밀리를 잇는 후속 패밀리를 생성합니다.
    pub fn successor(&self, id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            lineage_id: self.lineage_id,
            previous_family_id: Some(self.id),
            account_id: self.account_id,
            current_token_hash: token_hash,
            used: false,
            revoked: false,
            version: 0,
            created_at: Utc::now(),
            expires_at,
            used_at: None,
            revoked_at: None,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn state(&self) -> FamilyState {
        if self.revoked {
            FamilyState::Revoked
        } else if self.used {
            FamilyState::Consumed
        } else {
            FamilyState::Active
        }
    }

    /// 회전 과정에서 사용하는 값 뷰
    pub fn as_refresh_entity(&self) -> RefreshTokenEntity {
        RefreshTokenEntity {
            id: self.id,
            family_id: self.lineage_id,
            used: self.used,
            expires_at: self.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_successor_links_back_and_keeps_lineage() {
        let root = TokenFamily::start(Uuid::new_v4(), 1, "h1".to_string(), Utc::now() + Duration::days(1));
        let next = root.successor(Uuid::new_v4(), "h2".to_string(), Utc::now() + Duration::days(1));

        assert_eq!(root.lineage_id, root.id);
        assert_eq!(root.previous_family_id, None);
        assert_eq!(next.previous_family_id, Some(root.id));
        assert_eq!(next.lineage_id, root.id);
        assert_eq!(next.account_id, 1);
        assert_eq!(next.state(), FamilyState::Active);
    }

    #[test]
    fn test_state_prefers_revoked() {
        let mut family = TokenFamily::start(Uuid::new_v4(), 1, "h".to_string(), Utc::now());
        family.used = true;
        assert_eq!(family.state(), FamilyState::Consumed);

        family.revoked = true;
        assert_eq!(family.state(), FamilyState::Revoked);
    }

    #[test]
    fn test_refresh_entity_view() {
        let family = TokenFamily::start(Uuid::new_v4(), 9, "h".to_string(), Utc::now() + Duration::hours(1));
        let next = family.successor(Uuid::new_v4(), "h2".to_string(), family.expires_at);
        let entity = next.as_refresh_entity();

        assert_eq!(entity.id, next.id);
        assert_eq!(entity.family_id, family.id);
        assert!(!entity.used);
        assert_eq!(entity.expires_at, family.expires_at);
    }
}
