//! 토큰 모델 모듈
//!
//! 액세스 토큰 클레임과 리프레시 토큰의 외부 표현을 정의합니다.

pub mod token;
pub mod refresh_token;

pub use token::*;
pub use refresh_token::*;
