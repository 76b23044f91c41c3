//! 리프레시 토큰 패밀리 엔티티 모듈

pub mod token_family;

pub use token_family::*;
