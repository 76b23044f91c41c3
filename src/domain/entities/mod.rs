//! # 도메인 엔티티
//!
//! 저장소에 영속되는 인증 도메인의 핵심 객체들입니다.
//!
//! - [`tokens`] - 리프레시 토큰 패밀리 (회전 단위의 한 행)

pub mod tokens;

pub use tokens::*;
