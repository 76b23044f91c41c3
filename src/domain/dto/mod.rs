//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 본문을 정의합니다.
//!
//! | 구분 | 타입 | 용도 |
//! |------|------|------|
//! | 요청 | [`RefreshTokenRequest`] | `POST /api/v1/auth/refresh` |
//! | 요청 | [`LogoutRequest`] | `POST /api/v1/auth/logout` |
//! | 응답 | [`ApiResponse`] | 성공 응답 래퍼 |
//! | 응답 | [`ErrorResponse`] | 인증 실패 및 일반 에러 응답 |
//!
//! 입력 검증은 `validator` crate의 `#[validate]` 속성으로 수행합니다.

pub mod tokens;

pub use tokens::*;
