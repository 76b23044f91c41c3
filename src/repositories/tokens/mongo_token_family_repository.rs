//! # MongoDB 토큰 패밀리 리포지토리
//!
//! `token_families` 컬렉션에 패밀리 행을 저장합니다.
//!
//! ## 문서 형식
//!
//! | 필드 | 타입 | 설명 |
//! |------|------|------|
//! | `_id` | string | 패밀리 ID (UUID 하이픈 포함 표기) |
//! | `lineage_id` | string | 계보 ID |
//! | `previous_family_id` | string? | 직전 패밀리 ID |
//! | `account_id` | int64 | 소유 계정 |
//! | `current_token_hash` | string | 리프레시 토큰 다이제스트 |
//! | `used`, `revoked` | bool | 상태 플래그 |
//! | `version` | int64 | 낙관적 잠금 버전 |
//! | `*_at` | int64 | Unix epoch 밀리초 |
//!
//! ## 인덱스
//!
//! - `previous_family_id`: 후속 행 조회 (계보 폐기)
//! - `account_id`: 계정 전체 폐기
//! - `expires_at`: 만료 행 정리

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{doc, Document};
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::tokens::TokenFamily;
use crate::repositories::tokens::TokenFamilyStore;

const COLLECTION_NAME: &str = "token_families";

/// MongoDB에 저장되는 패밀리 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenFamilyDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub lineage_id: String,
    pub previous_family_id: Option<String>,
    pub account_id: i64,
    pub current_token_hash: String,
    pub used: bool,
    pub revoked: bool,
    pub version: i64,
    pub created_at: i64,
    pub expires_at: i64,
    pub used_at: Option<i64>,
    pub revoked_at: Option<i64>,
}

impl From<&TokenFamily> for TokenFamilyDocument {
    fn from(family: &TokenFamily) -> Self {
        Self {
            id: family.id.to_string(),
            lineage_id: family.lineage_id.to_string(),
            previous_family_id: family.previous_family_id.map(|id| id.to_string()),
            account_id: family.account_id,
            current_token_hash: family.current_token_hash.clone(),
            used: family.used,
            revoked: family.revoked,
            version: family.version,
            created_at: family.created_at.timestamp_millis(),
            expires_at: family.expires_at.timestamp_millis(),
            used_at: family.used_at.map(|at| at.timestamp_millis()),
            revoked_at: family.revoked_at.map(|at| at.timestamp_millis()),
        }
    }
}

impl TryFrom<TokenFamilyDocument> for TokenFamily {
    type Error = AppError;

    fn try_from(document: TokenFamilyDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&document.id)?,
            lineage_id: parse_uuid(&document.lineage_id)?,
            previous_family_id: document
                .previous_family_id
                .as_deref()
                .map(parse_uuid)
                .transpose()?,
            account_id: document.account_id,
            current_token_hash: document.current_token_hash,
            used: document.used,
            revoked: document.revoked,
            version: document.version,
            created_at: from_millis(document.created_at)?,
            expires_at: from_millis(document.expires_at)?,
            used_at: document.used_at.map(from_millis).transpose()?,
            revoked_at: document.revoked_at.map(from_millis).transpose()?,
        })
    }
}

fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AppError::DatabaseError(format!("잘못된 패밀리 ID '{}': {}", value, e)))
}

fn from_millis(millis: i64) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::DatabaseError(format!("잘못된 타임스탬프: {}", millis)))
}

/// MongoDB 기반 토큰 패밀리 리포지토리
pub struct MongoTokenFamilyRepository {
    collection: Collection<TokenFamilyDocument>,
}

impl MongoTokenFamilyRepository {
    /// 컬렉션 핸들을 얻고 필요한 인덱스를 생성합니다.
    pub async fn new(db: &Database) -> AppResult<Self> {
        let repository = Self {
            collection: db.get_database().collection::<TokenFamilyDocument>(COLLECTION_NAME),
        };
        repository.ensure_indexes().await?;
        Ok(repository)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "previous_family_id": 1 }).build(),
            IndexModel::builder().keys(doc! { "account_id": 1 }).build(),
            IndexModel::builder().keys(doc! { "expires_at": 1 }).build(),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(format!("인덱스 생성 실패: {}", e)))?;

        log::info!("📇 {} 인덱스 준비 완료", COLLECTION_NAME);
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> AppResult<Option<TokenFamily>> {
        self.collection
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .map(TokenFamily::try_from)
            .transpose()
    }
}

#[async_trait]
impl TokenFamilyStore for MongoTokenFamilyRepository {
    async fn find(&self, id: Uuid) -> AppResult<Option<TokenFamily>> {
        self.find_one(doc! { "_id": id.to_string() }).await
    }

    async fn find_successor(&self, id: Uuid) -> AppResult<Option<TokenFamily>> {
        self.find_one(doc! { "previous_family_id": id.to_string() }).await
    }

    async fn mark_used(&self, id: Uuid, expected_version: i64) -> AppResult<bool> {
        let filter = doc! {
            "_id": id.to_string(),
            "version": expected_version,
            "used": false,
            "revoked": false,
        };
        let update = doc! {
            "$set": { "used": true, "used_at": Utc::now().timestamp_millis() },
            "$inc": { "version": 1_i64 },
        };

        let result = self.collection
            .update_one(filter, update)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count == 1)
    }

    async fn insert(&self, family: TokenFamily) -> AppResult<Uuid> {
        self.collection
            .insert_one(TokenFamilyDocument::from(&family))
            .await
            .map_err(|e| AppError::DatabaseError(format!("토큰 패밀리 저장 실패: {}", e)))?;

        Ok(family.id)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = self.collection
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count == 1)
    }

    async fn revoke(&self, id: Uuid) -> AppResult<bool> {
        let result = self.collection
            .update_one(
                doc! { "_id": id.to_string(), "revoked": false },
                doc! {
                    "$set": { "revoked": true, "revoked_at": Utc::now().timestamp_millis() },
                    "$inc": { "version": 1_i64 },
                },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count == 1)
    }

    async fn revoke_all_for_account(&self, account_id: i64) -> AppResult<u64> {
        let result = self.collection
            .update_many(
                doc! { "account_id": account_id, "revoked": false },
                doc! {
                    "$set": { "revoked": true, "revoked_at": Utc::now().timestamp_millis() },
                    "$inc": { "version": 1_i64 },
                },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = self.collection
            .delete_many(doc! { "expires_at": { "$lte": now.timestamp_millis() } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_document_conversion_preserves_family() {
        let root = TokenFamily::start(
            Uuid::new_v4(),
            11,
            "digest".to_string(),
            DateTime::from_timestamp_millis(Utc::now().timestamp_millis()).unwrap() + Duration::days(14),
        );
        let mut next = root.successor(Uuid::new_v4(), "next".to_string(), root.expires_at);
        next.created_at = DateTime::from_timestamp_millis(next.created_at.timestamp_millis()).unwrap();
        next.used = true;
        next.used_at = Some(next.created_at);
        next.version = 1;

        let document = TokenFamilyDocument::from(&next);
        assert_eq!(document.previous_family_id, Some(root.id.to_string()));
        assert_eq!(document.expires_at, root.expires_at.timestamp_millis());

        assert_eq!(TokenFamily::try_from(document).unwrap(), next);
    }

    #[test]
    fn test_corrupt_document_is_database_error() {
        let family = TokenFamily::start(Uuid::new_v4(), 1, "d".to_string(), Utc::now());
        let mut document = TokenFamilyDocument::from(&family);
        document.lineage_id = "not-a-uuid".to_string();

        assert!(matches!(
            TokenFamily::try_from(document),
            Err(AppError::DatabaseError(_))
        ));
    }
}
