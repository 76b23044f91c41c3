//! 토큰 패밀리 저장소
//!
//! 회전 엔진은 [`TokenFamilyStore`] trait에만 의존하며, 백엔드는 실행 시
//! `STORE_BACKEND` 설정으로 선택됩니다.
//!
//! - [`MongoTokenFamilyRepository`] - MongoDB `token_families` 컬렉션 (운영)
//! - [`InMemoryTokenFamilyStore`] - 프로세스 내부 맵 (개발/테스트)
//!
//! 모든 구현은 `mark_used`를 조건부 갱신(compare-and-set)으로 제공해야 합니다.
//! 같은 패밀리에 대한 동시 회전 중 정확히 하나만 `true`를 받을 수 있어야 합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::core::errors::AppResult;
use crate::domain::entities::tokens::TokenFamily;

pub mod memory_token_family_store;
pub mod mongo_token_family_repository;

pub use memory_token_family_store::*;
pub use mongo_token_family_repository::*;

#[async_trait]
pub trait TokenFamilyStore: Send + Sync {
    /// ID로 패밀리 행을 조회합니다.
    async fn find(&self, id: Uuid) -> AppResult<Option<TokenFamily>>;

    /// `previous_family_id`가 주어진 ID인 후속 행을 조회합니다.
    async fn find_successor(&self, id: Uuid) -> AppResult<Option<TokenFamily>>;

    /// 행이 사용되지 않았고 폐기되지 않았으며 버전이 `expected_version`과 같을 때만
    /// `used = true`로 바꾸고 버전을 올립니다. 갱신이 일어났는지 여부를 반환합니다.
    async fn mark_used(&self, id: Uuid, expected_version: i64) -> AppResult<bool>;

    async fn insert(&self, family: TokenFamily) -> AppResult<Uuid>;

    /// 행을 삭제합니다. 회전이 실패했을 때 아직 발급되지 않은 후속 행을 지우는 데 사용합니다.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// 행을 폐기합니다. 이미 폐기된 행이면 `false`를 반환합니다.
    async fn revoke(&self, id: Uuid) -> AppResult<bool>;

    /// 계정의 모든 미폐기 행을 폐기하고 폐기한 행 수를 반환합니다.
    async fn revoke_all_for_account(&self, account_id: i64) -> AppResult<u64>;

    /// `expires_at <= now`인 행을 삭제하고 삭제한 행 수를 반환합니다.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
