//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 싱글톤 레지스트리 대신 애플리케이션 시작 시 한 번 조립되어
//! [`AppState`](crate::core::app_state::AppState)를 통해 핸들러와 미들웨어에 공유됩니다.

pub mod auth;
