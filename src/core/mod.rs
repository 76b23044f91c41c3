//! # Core Module
//!
//! 애플리케이션 전역에서 사용하는 에러 타입과 상태 조립을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//! - **자동 변환**: thiserror 기반 `From` 변환, `ErrorContext` 확장 trait
//!
//! ### [`auth_error`] - 인증 실패 분류
//! - 토큰/패밀리 관련 실패와 그 HTTP 상태, 에러 코드
//! - `is_auth_failure()`로 인증 필터의 차단 여부를 결정
//!
//! ### [`app_state`] - 구성 요소 조립
//! - 토큰 코덱, 해셔, 저장소, 회전 서비스, 인증 필터 협력 객체를 한 번 조립
//! - `web::Data<AppState>`로 핸들러에 공유
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 모듈 |
//! |--------|---------|
//! | `ApplicationContext` | `AppState` |
//! | `@ExceptionHandler` | `AppError::error_response()` |
//! | `AuthenticationException` | `AuthError` |

pub mod errors;
pub mod auth_error;
pub mod app_state;

pub use errors::*;
pub use auth_error::*;
pub use app_state::*;
