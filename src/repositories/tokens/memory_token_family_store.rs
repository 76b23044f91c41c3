//! 프로세스 내부 토큰 패밀리 저장소

use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::entities::tokens::TokenFamily;
use crate::repositories::tokens::TokenFamilyStore;

/// `RwLock<HashMap>` 기반 저장소
///
/// 조건부 갱신은 쓰기 잠금 안에서 검사와 변경을 함께 수행하므로 원자적입니다.
/// 잠금을 잡은 채로 `.await` 하지 않습니다.
#[derive(Default)]
pub struct InMemoryTokenFamilyStore {
    families: RwLock<HashMap<Uuid, TokenFamily>>,
}

impl InMemoryTokenFamilyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> AppResult<usize> {
        let families = self.families.read().context("토큰 패밀리 저장소 잠금 실패")?;
        Ok(families.len())
    }

    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl TokenFamilyStore for InMemoryTokenFamilyStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<TokenFamily>> {
        let families = self.families.read().context("토큰 패밀리 저장소 잠금 실패")?;
        Ok(families.get(&id).cloned())
    }

    async fn find_successor(&self, id: Uuid) -> AppResult<Option<TokenFamily>> {
        let families = self.families.read().context("토큰 패밀리 저장소 잠금 실패")?;
        Ok(families
            .values()
            .find(|family| family.previous_family_id == Some(id))
            .cloned())
    }

    async fn mark_used(&self, id: Uuid, expected_version: i64) -> AppResult<bool> {
        let mut families = self.families.write().context("토큰 패밀리 저장소 잠금 실패")?;

        match families.get_mut(&id) {
            Some(family)
                if !family.used && !family.revoked && family.version == expected_version =>
            {
                family.used = true;
                family.used_at = Some(Utc::now());
                family.version += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn insert(&self, family: TokenFamily) -> AppResult<Uuid> {
        let mut families = self.families.write().context("토큰 패밀리 저장소 잠금 실패")?;

        if families.contains_key(&family.id) {
            return Err(AppError::DatabaseError(format!(
                "이미 존재하는 토큰 패밀리입니다: {}",
                family.id
            )));
        }

        let id = family.id;
        families.insert(id, family);
        Ok(id)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut families = self.families.write().context("토큰 패밀리 저장소 잠금 실패")?;
        Ok(families.remove(&id).is_some())
    }

    async fn revoke(&self, id: Uuid) -> AppResult<bool> {
        let mut families = self.families.write().context("토큰 패밀리 저장소 잠금 실패")?;

        match families.get_mut(&id) {
            Some(family) if !family.revoked => {
                family.revoked = true;
                family.revoked_at = Some(Utc::now());
                family.version += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_account(&self, account_id: i64) -> AppResult<u64> {
        let mut families = self.families.write().context("토큰 패밀리 저장소 잠금 실패")?;
        let now = Utc::now();
        let mut revoked = 0;

        for family in families
            .values_mut()
            .filter(|family| family.account_id == account_id && !family.revoked)
        {
            family.revoked = true;
            family.revoked_at = Some(now);
            family.version += 1;
            revoked += 1;
        }

        Ok(revoked)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut families = self.families.write().context("토큰 패밀리 저장소 잠금 실패")?;
        let before = families.len();
        families.retain(|_, family| !family.is_expired_at(now));
        Ok((before - families.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn family(account_id: i64) -> TokenFamily {
        TokenFamily::start(
            Uuid::new_v4(),
            account_id,
            "digest".to_string(),
            Utc::now() + Duration::days(14),
        )
    }

    #[actix_web::test]
    async fn test_mark_used_is_compare_and_set() {
        let store = InMemoryTokenFamilyStore::new();
        let id = store.insert(family(1)).await.unwrap();

        assert!(!store.mark_used(id, 7).await.unwrap());
        assert!(store.mark_used(id, 0).await.unwrap());
        // 같은 버전으로 두 번째 시도는 실패
        assert!(!store.mark_used(id, 0).await.unwrap());
        assert!(!store.mark_used(id, 1).await.unwrap());

        let stored = store.find(id).await.unwrap().unwrap();
        assert!(stored.used);
        assert!(stored.used_at.is_some());
        assert_eq!(stored.version, 1);
    }

    #[actix_web::test]
    async fn test_mark_used_refuses_revoked_family() {
        let store = InMemoryTokenFamilyStore::new();
        let id = store.insert(family(1)).await.unwrap();

        assert!(store.revoke(id).await.unwrap());
        assert!(!store.revoke(id).await.unwrap());

        let version = store.find(id).await.unwrap().unwrap().version;
        assert!(!store.mark_used(id, version).await.unwrap());
    }

    #[actix_web::test]
    async fn test_find_successor_follows_previous_link() {
        let store = InMemoryTokenFamilyStore::new();
        let root = family(1);
        let next = root.successor(Uuid::new_v4(), "next".to_string(), root.expires_at);
        store.insert(root.clone()).await.unwrap();
        store.insert(next.clone()).await.unwrap();

        assert_eq!(store.find_successor(root.id).await.unwrap(), Some(next.clone()));
        assert_eq!(store.find_successor(next.id).await.unwrap(), None);
        assert_eq!(store.find(Uuid::new_v4()).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_duplicate_insert_is_rejected() {
        let store = InMemoryTokenFamilyStore::new();
        let row = family(1);
        store.insert(row.clone()).await.unwrap();

        assert!(store.insert(row).await.is_err());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_revoke_all_for_account_only_touches_that_account() {
        let store = InMemoryTokenFamilyStore::new();
        let a1 = store.insert(family(1)).await.unwrap();
        let a2 = store.insert(family(1)).await.unwrap();
        let b = store.insert(family(2)).await.unwrap();
        store.revoke(a2).await.unwrap();

        assert_eq!(store.revoke_all_for_account(1).await.unwrap(), 1);
        assert!(store.find(a1).await.unwrap().unwrap().revoked);
        assert!(!store.find(b).await.unwrap().unwrap().revoked);
    }

    #[actix_web::test]
    async fn test_delete_expired_removes_rows_at_or_before_now() {
        let store = InMemoryTokenFamilyStore::new();
        let now = Utc::now();
        let mut expired = family(1);
        expired.expires_at = now;
        let live = family(1);
        store.insert(expired).await.unwrap();
        let live_id = store.insert(live).await.unwrap();

        assert_eq!(store.delete_expired(now).await.unwrap(), 1);
        assert_eq!(store.len().unwrap(), 1);
        assert!(store.find(live_id).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_delete_removes_row_once() {
        let store = InMemoryTokenFamilyStore::new();
        let id = store.insert(family(1)).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert_eq!(store.find(id).await.unwrap(), None);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_len_reports_poisoned_lock() {
        let store = InMemoryTokenFamilyStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.families.write().unwrap();
            panic!("writer panicked while holding the lock");
        }));

        assert!(matches!(store.len(), Err(AppError::InternalError(_))));
        assert!(store.is_empty().is_err());
    }
}
