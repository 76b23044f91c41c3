//! # 도메인 모델
//!
//! 저장소에 직접 영속되지 않는 인증 관련 값 객체들입니다.
//!
//! - [`auth`] - 인증된 사용자, 요청 단위 보안 컨텍스트, 역할 요구사항
//! - [`token`] - JWT 클레임, 리프레시 토큰 표현, 회전 결과

pub mod auth;
pub mod token;
