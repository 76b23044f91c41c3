//! 인증 및 토큰 서비스 모듈
//!
//! # Components
//!
//! - [`TokenCodec`] - HS256 액세스 토큰 발급/검증
//! - [`TokenHasher`] - 리프레시 토큰 다이제스트 (원문은 저장하지 않음)
//! - [`RefreshRotationService`] - 리프레시 토큰 회전과 재사용 감지
//! - [`AuthenticationService`] - 인증 필터가 사용하는 베어러 토큰 인증
//!
//! # Security
//!
//! - 리프레시 토큰은 1회용이며, 재사용 시 계보 전체가 폐기됩니다.
//! - 로그에는 패밀리 ID만 남기고 토큰 원문과 다이제스트는 남기지 않습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{RefreshRotationService, TokenCodec};
//!
//! let tokens = rotation_service.issue_token_pair(&claims).await?;
//! let rotated = rotation_service.rotate(&tokens.refresh_token, &claims).await?;
//! ```

pub mod token_codec;
pub mod token_hasher;
pub mod refresh_rotation_service;
pub mod authentication_service;

pub use token_codec::*;
pub use token_hasher::*;
pub use refresh_rotation_service::*;
pub use authentication_service::*;
