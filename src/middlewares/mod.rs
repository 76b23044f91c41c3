//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 인증 필터와 그 협력 객체들을 제공합니다.
//!
//! ```text
//! 요청 ─▶ AuthenticationFilter
//!          ├─ TokenExtractor            Authorization 헤더에서 베어러 토큰 추출
//!          ├─ AuthenticationService     토큰 검증, 사용자 신원 확인
//!          ├─ ContextManager            요청 extensions에 SecurityContext 바인딩/해제
//!          └─ AuthenticationEntryPoint  인증 실패 시 JSON 에러 응답
//!       ─▶ 핸들러 (AuthenticatedUser / OptionalUser 추출자)
//! ```
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let filter = state.authentication_filter();
//!
//! App::new().service(
//!     web::scope("/api/v1/admin")
//!         .wrap(filter)
//!         .route("/token-families/expired", web::delete().to(purge_expired_families)),
//! );
//! ```

pub mod auth_middleware;
mod auth_inner;
pub mod token_extractor;
pub mod context_manager;
pub mod entry_point;

pub use auth_middleware::AuthenticationFilter;
pub use token_extractor::{BearerTokenExtractor, TokenExtractor};
pub use context_manager::{ContextManager, RequestContextManager};
pub use entry_point::{AuthenticationEntryPoint, JsonAuthenticationEntryPoint};
