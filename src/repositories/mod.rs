//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 토큰 패밀리 저장소 trait과 MongoDB/인메모리 구현을 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::tokens::{InMemoryTokenFamilyStore, TokenFamilyStore};
//!
//! let store: Arc<dyn TokenFamilyStore> = Arc::new(InMemoryTokenFamilyStore::new());
//! let family = store.find(family_id).await?;
//! ```

pub mod tokens;
