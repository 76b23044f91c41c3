//! 리프레시 토큰 회전 서비스
//!
//! 리프레시 토큰은 1회용입니다. 제시된 토큰의 패밀리 행을 `used`로 표시하고
//! 후속 행을 새로 만들어 토큰 쌍을 재발급합니다. 이미 `used`인 행의 토큰이
//! 다시 제시되면 탈취된 토큰의 재사용으로 보고 계보 전체를 폐기합니다.
//!
//! ```text
//! 제시된 토큰
//!   │ 1. 다이제스트 계산
//!   │ 2. family_id 파싱 → 행 조회
//!   │ 3. 다이제스트/만료 검증
//!   │ 4. 소유 계정 검증
//!   │ 5. 후속 행 저장 (아직 토큰은 반환하지 않음)
//!   ├─ used    → 후속 행 삭제 → 계보 폐기 + TokenReuseDetected
//!   ├─ revoked → 후속 행 삭제 → FamilyRevoked
//!   └─ active  → mark_used (CAS) → 새 토큰 쌍
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use chrono::{Duration, Utc};
use log::{debug, error, info, warn};
use uuid::Uuid;
use crate::core::auth_error::{AuthError, TokenFailureReason};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::tokens::{FamilyState, TokenFamily};
use crate::domain::models::token::{RefreshToken, TokenClaims, TokenRefreshResult};
use crate::repositories::tokens::TokenFamilyStore;
use crate::services::auth::token_codec::TokenCodec;
use crate::services::auth::token_hasher::{digests_match, TokenHasher};

/// 조건부 갱신이 실패했을 때 다시 읽고 시도하는 최대 횟수 (최초 시도 포함)
const MARK_USED_ATTEMPTS: usize = 2;

/// CAS 시도 결과
enum Redemption {
    Redeemed,
    /// 이미 사용된 행 (재사용 이벤트)
    Consumed(TokenFamily),
    Revoked(Uuid),
}

/// CAS 전에 저장된 후속 행과 발급할 토큰 쌍
struct StagedSuccessor {
    consumed_id: Uuid,
    successor_id: Uuid,
    tokens: TokenRefreshResult,
}

pub struct RefreshRotationService {
    codec: Arc<TokenCodec>,
    hasher: Arc<dyn TokenHasher>,
    store: Arc<dyn TokenFamilyStore>,
    refresh_ttl: Duration,
}

impl RefreshRotationService {
    pub fn new(
        codec: Arc<TokenCodec>,
        hasher: Arc<dyn TokenHasher>,
        store: Arc<dyn TokenFamilyStore>,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            codec,
            hasher,
            store,
            refresh_ttl,
        }
    }

    /// 로그인/회원가입 시 새 계보를 시작하고 토큰 쌍을 발급합니다.
    pub async fn issue_token_pair(&self, claims: &TokenClaims) -> AppResult<TokenRefreshResult> {
        let family_id = Uuid::new_v4();
        let refresh_token = RefreshToken::generate(family_id).encode();
        let digest = self.hasher.hash(&refresh_token)?;

        let family = TokenFamily::start(
            family_id,
            claims.user_id,
            digest,
            Utc::now() + self.refresh_ttl,
        );
        self.store.insert(family).await?;

        let access_token = self.codec.issue(claims)?;
        info!("🔑 토큰 발급: account={} family={}", claims.user_id, family_id);

        Ok(TokenRefreshResult::bearer(
            access_token,
            refresh_token,
            self.codec.access_ttl_seconds(),
        ))
    }

    /// 리프레시 토큰을 회전합니다.
    ///
    /// `caller`는 요청자가 주장하는 신원(만료되었을 수 있는 액세스 토큰의 클레임)이며,
    /// 새 액세스 토큰도 이 클레임으로 발급됩니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::TokenHashingFailed` - 다이제스트 계산 실패 (500)
    /// * `AuthError::InvalidRefreshToken` - 형식 오류, 다이제스트 불일치, 만료
    /// * `AuthError::TokenFamilyNotFound` - 토큰에 담긴 패밀리가 없음
    /// * `AuthError::FamilyOwnershipMismatch` - 다른 계정의 패밀리
    /// * `AuthError::TokenReuseDetected` - 이미 사용된 토큰 (계보 폐기됨)
    /// * `AuthError::FamilyRevoked` - 폐기된 패밀리
    pub async fn rotate(&self, raw_token: &str, caller: &TokenClaims) -> AppResult<TokenRefreshResult> {
        let family = self.load_verified(raw_token, caller.user_id).await?;
        self.redeem(family, caller).await
    }

    /// 로그아웃: 토큰을 검증한 뒤 그 계보 전체를 폐기합니다.
    pub async fn revoke(&self, raw_token: &str, account_id: i64) -> AppResult<usize> {
        let family = self.load_verified(raw_token, account_id).await?;
        let revoked = self.revoke_lineage(&family).await?;

        info!("🚪 로그아웃: account={} lineage={} revoked={}", account_id, family.lineage_id, revoked);
        Ok(revoked)
    }

    /// 계정의 모든 패밀리를 폐기합니다.
    pub async fn revoke_all(&self, account_id: i64) -> AppResult<u64> {
        let revoked = self.store.revoke_all_for_account(account_id).await?;
        info!("🚪 전체 로그아웃: account={} revoked={}", account_id, revoked);
        Ok(revoked)
    }

    /// 만료된 패밀리 행을 삭제합니다.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        let deleted = self.store.delete_expired(Utc::now()).await?;
        info!("🧹 만료된 토큰 패밀리 정리: {}건", deleted);
        Ok(deleted)
    }

    /// 주어진 행이 속한 계보를 모두 폐기하고, 새로 폐기한 행 수를 반환합니다.
    ///
    /// `previous_family_id`를 따라 뒤로, 후속 행을 따라 앞으로 반복 순회합니다.
    pub async fn revoke_lineage(&self, family: &TokenFamily) -> AppResult<usize> {
        let mut visited = HashSet::new();
        let mut pending = vec![family.id];
        let mut revoked = 0;

        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }

            let Some(row) = self.store.find(id).await? else {
                continue;
            };

            if self.store.revoke(id).await? {
                revoked += 1;
            }
            if let Some(previous) = row.previous_family_id {
                pending.push(previous);
            }
            if let Some(successor) = self.store.find_successor(id).await? {
                pending.push(successor.id);
            }
        }

        Ok(revoked)
    }

    /// 1~4단계: 다이제스트, 조회, 무결성/만료, 소유권 검증
    async fn load_verified(&self, raw_token: &str, account_id: i64) -> AppResult<TokenFamily> {
        let digest = self.hasher.hash(raw_token)?;
        let token = RefreshToken::parse(raw_token)?;

        let family = self
            .store
            .find(token.family_id())
            .await?
            .ok_or(AuthError::TokenFamilyNotFound(token.family_id()))?;

        if !digests_match(&digest, &family.current_token_hash) {
            return Err(AuthError::InvalidRefreshToken(TokenFailureReason::DigestMismatch).into());
        }
        if family.is_expired_at(Utc::now()) {
            return Err(AuthError::InvalidRefreshToken(TokenFailureReason::Expired).into());
        }
        if family.account_id != account_id {
            warn!(
                "⚠️ 패밀리 소유권 불일치: family={} owner={} caller={}",
                family.id, family.account_id, account_id
            );
            return Err(AuthError::FamilyOwnershipMismatch {
                family_id: family.id,
                claimed_account_id: account_id,
            }
            .into());
        }

        Ok(family)
    }

    /// 5~7단계: 후속 행을 먼저 저장한 뒤 조건부로 사용 처리합니다.
    ///
    /// 실패할 수 있는 작업(토큰 생성, 해시, 후속 행 저장)은 모두 `mark_used` 전에 끝냅니다.
    /// 그래서 `used = true`가 기록된 행에는 항상 후속 행이 있고, 저장소 오류 뒤의
    /// 재시도가 재사용으로 오인되지 않습니다. 후속 행의 토큰은 CAS에 성공해야만
    /// 반환되므로 그 전까지는 누구도 사용할 수 없습니다.
    async fn redeem(&self, family: TokenFamily, caller: &TokenClaims) -> AppResult<TokenRefreshResult> {
        let staged = self.stage_successor(&family, caller).await?;

        let outcome = self.claim(family).await;
        if !matches!(outcome, Ok(Redemption::Redeemed)) {
            self.discard_staged(staged.successor_id).await;
        }

        match outcome? {
            Redemption::Redeemed => {
                info!(
                    "🔄 리프레시 토큰 회전: account={} {} → {}",
                    caller.user_id, staged.consumed_id, staged.successor_id
                );
                Ok(staged.tokens)
            }
            Redemption::Consumed(consumed) => Err(self.reject_reuse(&consumed).await),
            Redemption::Revoked(id) => Err(AuthError::FamilyRevoked(id).into()),
        }
    }

    /// 사용 처리 (CAS). 경합으로 실패하면 한 번 다시 읽고 재시도합니다.
    async fn claim(&self, family: TokenFamily) -> AppResult<Redemption> {
        let mut current = family;

        for attempt in 1..=MARK_USED_ATTEMPTS {
            let entity = current.as_refresh_entity();
            debug!("회전 대상 확인: {:?} (시도 {})", entity, attempt);

            // used 검사가 revoked보다 먼저: 폐기된 계보의 사용된 토큰도 재사용 이벤트
            if entity.used {
                return Ok(Redemption::Consumed(current));
            }
            if current.state() == FamilyState::Revoked {
                return Ok(Redemption::Revoked(current.id));
            }

            if self.store.mark_used(current.id, current.version).await? {
                return Ok(Redemption::Redeemed);
            }

            if attempt < MARK_USED_ATTEMPTS {
                warn!("⚠️ 패밀리 갱신 경합, 재조회 후 재시도: family={}", current.id);
                current = self
                    .store
                    .find(current.id)
                    .await?
                    .ok_or(AuthError::TokenFamilyNotFound(current.id))?;
            }
        }

        Ok(Redemption::Consumed(current))
    }

    async fn stage_successor(&self, consumed: &TokenFamily, caller: &TokenClaims) -> AppResult<StagedSuccessor> {
        let next_id = Uuid::new_v4();
        let refresh_token = RefreshToken::generate(next_id).encode();
        let digest = self.hasher.hash(&refresh_token)?;
        let access_token = self.codec.issue(caller)?;

        let successor = consumed.successor(next_id, digest, Utc::now() + self.refresh_ttl);
        self.store.insert(successor).await?;

        Ok(StagedSuccessor {
            consumed_id: consumed.id,
            successor_id: next_id,
            tokens: TokenRefreshResult::bearer(
                access_token,
                refresh_token,
                self.codec.access_ttl_seconds(),
            ),
        })
    }

    /// 회전에 실패했을 때 미리 저장한 후속 행을 지웁니다.
    ///
    /// 계보 폐기가 후속 행을 따라가기 전에 호출되어야 합니다.
    async fn discard_staged(&self, successor_id: Uuid) {
        match self.store.delete(successor_id).await {
            Ok(_) => debug!("미사용 후속 행 삭제: family={}", successor_id),
            Err(e) => error!("❌ 미사용 후속 행 삭제 실패: family={} error={}", successor_id, e),
        }
    }

    /// 재사용 이벤트: 계보를 폐기하고 반환할 에러를 만듭니다.
    async fn reject_reuse(&self, family: &TokenFamily) -> AppError {
        error!(
            "🚨 리프레시 토큰 재사용 감지: account={} family={} lineage={}",
            family.account_id, family.id, family.lineage_id
        );

        match self.revoke_lineage(family).await {
            Ok(revoked) => {
                warn!("🔒 계보 폐기 완료: lineage={} revoked={}", family.lineage_id, revoked);
                AuthError::TokenReuseDetected(family.id).into()
            }
            Err(e) => {
                error!("❌ 계보 폐기 실패: lineage={} error={}", family.lineage_id, e);
                e
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use chrono::DateTime;
    use crate::repositories::tokens::InMemoryTokenFamilyStore;
    use crate::services::auth::token_hasher::Sha256TokenHasher;

    /// 인메모리 저장소에 조회 후 양보, 조건부 갱신/저장 실패 주입을 더한 테스트용 저장소
    #[derive(Default)]
    struct ScriptedStore {
        inner: InMemoryTokenFamilyStore,
        yield_after_find: bool,
        cas_failures: AtomicUsize,
        insert_failures: AtomicUsize,
    }

    fn take_one(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    #[async_trait]
    impl TokenFamilyStore for ScriptedStore {
        async fn find(&self, id: Uuid) -> AppResult<Option<TokenFamily>> {
            let found = self.inner.find(id).await;
            if self.yield_after_find {
                tokio::task::yield_now().await;
            }
            found
        }

        async fn find_successor(&self, id: Uuid) -> AppResult<Option<TokenFamily>> {
            self.inner.find_successor(id).await
        }

        async fn mark_used(&self, id: Uuid, expected_version: i64) -> AppResult<bool> {
            if take_one(&self.cas_failures) {
                return Ok(false);
            }
            self.inner.mark_used(id, expected_version).await
        }

        async fn insert(&self, family: TokenFamily) -> AppResult<Uuid> {
            if take_one(&self.insert_failures) {
                return Err(AppError::DatabaseError("write concern timeout".to_string()));
            }
            self.inner.insert(family).await
        }

        async fn delete(&self, id: Uuid) -> AppResult<bool> {
            self.inner.delete(id).await
        }

        async fn revoke(&self, id: Uuid) -> AppResult<bool> {
            self.inner.revoke(id).await
        }

        async fn revoke_all_for_account(&self, account_id: i64) -> AppResult<u64> {
            self.inner.revoke_all_for_account(account_id).await
        }

        async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
            self.inner.delete_expired(now).await
        }
    }

    struct FailingHasher;

    impl TokenHasher for FailingHasher {
        fn hash(&self, _raw_token: &str) -> Result<String, AuthError> {
            Err(AuthError::TokenHashingFailed("digest provider unavailable".to_string()))
        }
    }

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new("rotation-test-secret", Duration::minutes(30)))
    }

    fn service(store: Arc<dyn TokenFamilyStore>) -> RefreshRotationService {
        RefreshRotationService::new(
            codec(),
            Arc::new(Sha256TokenHasher::new("pepper")),
            store,
            Duration::days(14),
        )
    }

    fn caller(user_id: i64) -> TokenClaims {
        TokenClaims::new(user_id, "지원자", ["user"])
    }

    fn family_id_of(raw: &str) -> Uuid {
        RefreshToken::parse(raw).unwrap().family_id()
    }

    fn auth_error(result: AppResult<TokenRefreshResult>) -> AuthError {
        match result {
            Err(AppError::Auth(err)) => err,
            Err(other) => panic!("expected auth error, got {:?}", other),
            Ok(_) => panic!("expected auth error, got success"),
        }
    }

    #[actix_web::test]
    async fn test_rotation_consumes_family_and_links_successor() {
        let store = Arc::new(InMemoryTokenFamilyStore::new());
        let service = service(store.clone());
        let login = service.issue_token_pair(&caller(1)).await.unwrap();
        let f1 = family_id_of(&login.refresh_token);

        let rotated = service.rotate(&login.refresh_token, &caller(1)).await.unwrap();
        let f2 = family_id_of(&rotated.refresh_token);

        let consumed = store.find(f1).await.unwrap().unwrap();
        assert!(consumed.used);
        assert_eq!(consumed.version, 1);

        let successor = store.find(f2).await.unwrap().unwrap();
        assert_eq!(successor.previous_family_id, Some(f1));
        assert_eq!(successor.lineage_id, f1);
        assert!(!successor.used);
        assert_ne!(successor.current_token_hash, consumed.current_token_hash);

        assert_eq!(codec().verify(&rotated.access_token).unwrap(), caller(1));
        assert_eq!(rotated.expires_in, 1800);
        assert_eq!(rotated.token_type, "Bearer");
    }

    #[actix_web::test]
    async fn test_second_redemption_is_reuse_and_revokes_lineage() {
        let store = Arc::new(InMemoryTokenFamilyStore::new());
        let service = service(store.clone());
        let login = service.issue_token_pair(&caller(1)).await.unwrap();
        let f1 = family_id_of(&login.refresh_token);

        let rotated = service.rotate(&login.refresh_token, &caller(1)).await.unwrap();
        let f2 = family_id_of(&rotated.refresh_token);

        let replay = service.rotate(&login.refresh_token, &caller(1)).await;
        assert_eq!(auth_error(replay), AuthError::TokenReuseDetected(f1));

        assert!(store.find(f1).await.unwrap().unwrap().revoked);
        assert!(store.find(f2).await.unwrap().unwrap().revoked);

        // 정상 후속 토큰도 이미 폐기됨
        let next = service.rotate(&rotated.refresh_token, &caller(1)).await;
        assert_eq!(auth_error(next), AuthError::FamilyRevoked(f2));
    }

    #[actix_web::test]
    async fn test_reuse_from_middle_of_chain_revokes_both_directions() {
        let store = Arc::new(InMemoryTokenFamilyStore::new());
        let service = service(store.clone());
        let login = service.issue_token_pair(&caller(1)).await.unwrap();
        let second = service.rotate(&login.refresh_token, &caller(1)).await.unwrap();
        let third = service.rotate(&second.refresh_token, &caller(1)).await.unwrap();

        let replay = service.rotate(&second.refresh_token, &caller(1)).await;
        assert!(matches!(auth_error(replay), AuthError::TokenReuseDetected(_)));

        for raw in [&login.refresh_token, &second.refresh_token, &third.refresh_token] {
            assert!(store.find(family_id_of(raw)).await.unwrap().unwrap().revoked);
        }
    }

    #[actix_web::test]
    async fn test_unknown_family_is_not_found() {
        let service = service(Arc::new(InMemoryTokenFamilyStore::new()));
        let unknown = Uuid::new_v4();
        let raw = RefreshToken::generate(unknown).encode();

        let result = service.rotate(&raw, &caller(1)).await;
        assert_eq!(auth_error(result), AuthError::TokenFamilyNotFound(unknown));
    }

    #[actix_web::test]
    async fn test_malformed_token_is_invalid() {
        let service = service(Arc::new(InMemoryTokenFamilyStore::new()));

        let result = service.rotate("definitely-not-a-refresh-token", &caller(1)).await;
        assert_eq!(
            auth_error(result),
            AuthError::InvalidRefreshToken(TokenFailureReason::Malformed)
        );
    }

    #[actix_web::test]
    async fn test_wrong_secret_is_digest_mismatch() {
        let store = Arc::new(InMemoryTokenFamilyStore::new());
        let service = service(store.clone());
        let login = service.issue_token_pair(&caller(1)).await.unwrap();
        let forged = RefreshToken::generate(family_id_of(&login.refresh_token)).encode();

        let result = service.rotate(&forged, &caller(1)).await;
        assert_eq!(
            auth_error(result),
            AuthError::InvalidRefreshToken(TokenFailureReason::DigestMismatch)
        );
        assert!(!store.find(family_id_of(&forged)).await.unwrap().unwrap().used);
    }

    #[actix_web::test]
    async fn test_expired_family_is_rejected_even_with_matching_digest() {
        let store = Arc::new(InMemoryTokenFamilyStore::new());
        let hasher = Sha256TokenHasher::new("pepper");
        let id = Uuid::new_v4();
        let raw = RefreshToken::generate(id).encode();
        store
            .insert(TokenFamily::start(
                id,
                1,
                hasher.hash(&raw).unwrap(),
                Utc::now() - Duration::seconds(1),
            ))
            .await
            .unwrap();

        let result = service(store.clone()).rotate(&raw, &caller(1)).await;
        assert_eq!(
            auth_error(result),
            AuthError::InvalidRefreshToken(TokenFailureReason::Expired)
        );
        assert!(!store.find(id).await.unwrap().unwrap().used);
    }

    #[actix_web::test]
    async fn test_ownership_mismatch_on_valid_unused_token() {
        let store = Arc::new(InMemoryTokenFamilyStore::new());
        let service = service(store.clone());
        let login = service.issue_token_pair(&caller(1)).await.unwrap();
        let f1 = family_id_of(&login.refresh_token);

        let result = service.rotate(&login.refresh_token, &caller(2)).await;
        assert_eq!(
            auth_error(result),
            AuthError::FamilyOwnershipMismatch {
                family_id: f1,
                claimed_account_id: 2,
            }
        );
        assert!(!store.find(f1).await.unwrap().unwrap().used);
    }

    #[actix_web::test]
    async fn test_hashing_failure_is_internal_error() {
        let service = RefreshRotationService::new(
            codec(),
            Arc::new(FailingHasher),
            Arc::new(InMemoryTokenFamilyStore::new()),
            Duration::days(14),
        );
        let raw = RefreshToken::generate(Uuid::new_v4()).encode();

        let err = service.rotate(&raw, &caller(1)).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::TokenHashingFailed(_))));
        assert!(err.as_auth_failure().is_none());
        assert_eq!(
            actix_web::ResponseError::status_code(&err),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_concurrent_redemption_has_exactly_one_winner() {
        let store = Arc::new(ScriptedStore {
            yield_after_find: true,
            ..Default::default()
        });
        let service = service(store.clone());
        let login = service.issue_token_pair(&caller(1)).await.unwrap();
        let f1 = family_id_of(&login.refresh_token);

        let (first, second) = futures_util::future::join(
            service.rotate(&login.refresh_token, &caller(1)),
            service.rotate(&login.refresh_token, &caller(1)),
        )
        .await;

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes.iter().any(|r| matches!(
            r,
            Err(AppError::Auth(AuthError::TokenReuseDetected(id))) if *id == f1
        )));
        assert!(store.inner.find(f1).await.unwrap().unwrap().revoked);
        // 진 쪽이 미리 저장한 후속 행은 남지 않음
        assert_eq!(store.inner.len().unwrap(), 2);
    }

    #[actix_web::test]
    async fn test_single_contention_is_retried() {
        let store = Arc::new(ScriptedStore {
            cas_failures: AtomicUsize::new(1),
            ..Default::default()
        });
        let service = service(store.clone());
        let login = service.issue_token_pair(&caller(1)).await.unwrap();

        let rotated = service.rotate(&login.refresh_token, &caller(1)).await;
        assert!(rotated.is_ok());
        assert!(store.inner.find(family_id_of(&login.refresh_token)).await.unwrap().unwrap().used);
    }

    #[actix_web::test]
    async fn test_repeated_contention_is_treated_as_reuse() {
        let store = Arc::new(ScriptedStore {
            cas_failures: AtomicUsize::new(2),
            ..Default::default()
        });
        let service = service(store.clone());
        let login = service.issue_token_pair(&caller(1)).await.unwrap();
        let f1 = family_id_of(&login.refresh_token);

        let result = service.rotate(&login.refresh_token, &caller(1)).await;
        assert_eq!(auth_error(result), AuthError::TokenReuseDetected(f1));
        assert!(store.inner.find(f1).await.unwrap().unwrap().revoked);
        assert_eq!(store.inner.len().unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_failed_successor_write_leaves_token_redeemable() {
        let store = Arc::new(ScriptedStore::default());
        let service = service(store.clone());
        let login = service.issue_token_pair(&caller(1)).await.unwrap();
        let f1 = family_id_of(&login.refresh_token);

        store.insert_failures.store(1, Ordering::SeqCst);
        let failed = service.rotate(&login.refresh_token, &caller(1)).await;
        assert!(matches!(failed, Err(AppError::DatabaseError(_))));

        let untouched = store.inner.find(f1).await.unwrap().unwrap();
        assert!(!untouched.used);
        assert!(!untouched.revoked);

        // 같은 토큰으로 재시도하면 재사용이 아니라 정상 회전
        let retried = service.rotate(&login.refresh_token, &caller(1)).await.unwrap();
        let f2 = family_id_of(&retried.refresh_token);
        assert!(store.inner.find(f1).await.unwrap().unwrap().used);
        assert_eq!(store.inner.find(f2).await.unwrap().unwrap().previous_family_id, Some(f1));
        assert_eq!(store.inner.len().unwrap(), 2);
    }

    #[actix_web::test]
    async fn test_logout_revokes_whole_lineage() {
        let store = Arc::new(InMemoryTokenFamilyStore::new());
        let service = service(store.clone());
        let login = service.issue_token_pair(&caller(1)).await.unwrap();
        let second = service.rotate(&login.refresh_token, &caller(1)).await.unwrap();
        let third = service.rotate(&second.refresh_token, &caller(1)).await.unwrap();

        assert_eq!(service.revoke(&third.refresh_token, 1).await.unwrap(), 3);

        let result = service.rotate(&third.refresh_token, &caller(1)).await;
        assert_eq!(
            auth_error(result),
            AuthError::FamilyRevoked(family_id_of(&third.refresh_token))
        );
        assert_eq!(store.len().unwrap(), 3);
    }

    #[actix_web::test]
    async fn test_logout_checks_ownership() {
        let service = service(Arc::new(InMemoryTokenFamilyStore::new()));
        let login = service.issue_token_pair(&caller(1)).await.unwrap();

        let err = service.revoke(&login.refresh_token, 9).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::FamilyOwnershipMismatch { .. })));
    }

    #[actix_web::test]
    async fn test_revoke_all_and_purge() {
        let store = Arc::new(InMemoryTokenFamilyStore::new());
        let service = service(store.clone());
        service.issue_token_pair(&caller(1)).await.unwrap();
        service.issue_token_pair(&caller(1)).await.unwrap();
        let other = service.issue_token_pair(&caller(2)).await.unwrap();

        assert_eq!(service.revoke_all(1).await.unwrap(), 2);
        assert!(service.rotate(&other.refresh_token, &caller(2)).await.is_ok());

        let stale = Uuid::new_v4();
        store
            .insert(TokenFamily::start(stale, 3, "d".to_string(), Utc::now() - Duration::days(1)))
            .await
            .unwrap();
        assert_eq!(service.purge_expired().await.unwrap(), 1);
        assert!(store.find(stale).await.unwrap().is_none());
    }
}
