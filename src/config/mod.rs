//! # Configuration Module
//!
//! 인증 코어의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 저장소 백엔드, 서버, Rate Limiting 설정
//! - [`auth_config`] - JWT, 리프레시 토큰, 인증 프로바이더 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 토큰 설정
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_ACCESS_TOKEN_MINUTES="30"
//! export REFRESH_TOKEN_EXPIRATION_DAYS="14"
//!
//! # 저장소
//! export STORE_BACKEND="mongodb"   # mongodb | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
