//! # Domain Layer Module
//!
//! 인증 코어의 도메인 타입을 모아 둔 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 영속되는 토큰 패밀리
//! ├── DTOs      - HTTP 요청/응답 본문
//! └── Models    - 클레임, 리프레시 토큰, 인증 사용자, 보안 컨텍스트
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## 모듈 구성
//!
//! - [`entities`] - `TokenFamily`: 리프레시 토큰 한 세대를 나타내는 저장소 행.
//!   `used`, `revoked` 플래그와 낙관적 동시성 제어용 `version`을 가집니다.
//! - [`dto`] - API 계약. 에러 응답 형식(`ErrorResponse`)도 여기 있습니다.
//! - [`models`] - 저장되지 않는 값 객체들
//!   - `TokenClaims`: 액세스 토큰에 서명되는 `{userId, userNickname, roles}`
//!   - `RefreshToken`: `{family_id}.{secret}` 형식의 불투명 토큰
//!   - `AuthenticatedUser`: 로컬/OAuth 사용자를 묶은 열거형
//!   - `SecurityContext`: 요청 단위로 바인딩되는 인증 정보

pub mod entities;
pub mod dto;
pub mod models;

