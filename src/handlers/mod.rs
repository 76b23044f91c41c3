//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Middlewares - 인증 필터, 보안 컨텍스트
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 토큰 코덱, 회전 엔진                  ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 토큰 패밀리 저장소                ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`token_handlers`**: 토큰 관련 엔드포인트
//!   - 토큰 갱신 (`POST /api/v1/auth/refresh`)
//!   - 로그아웃 (`POST /api/v1/auth/logout`)
//!   - 전체 세션 종료 (`POST /api/v1/auth/revoke-all`)
//!   - 현재 사용자 조회 (`GET /api/v1/auth/me`)
//!   - 만료 패밀리 정리 (`DELETE /api/v1/admin/token-families/expired`)
//!
//! 인증이 필요한 핸들러는 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)
//! 추출기로 보안 컨텍스트의 사용자를 받습니다. 인증 필터가 감싸지 않은 라우트에서는
//! 추출기가 401을 반환합니다.

pub mod token_handlers;
