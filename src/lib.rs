//! 면접 연습 서비스 인증 코어
//!
//! JWT 액세스 토큰과 리프레시 토큰 패밀리 기반의 인증 서비스입니다.
//! 리프레시 토큰은 1회용이며, 이미 사용된 토큰이 다시 제시되면
//! 해당 계보 전체를 폐기합니다.
//!
//! # Features
//!
//! - **토큰 코덱**: HS256 액세스 토큰 발급/검증
//! - **토큰 해셔**: 리프레시 토큰은 다이제스트만 저장
//! - **토큰 패밀리 저장소**: MongoDB 또는 프로세스 내부 저장소
//! - **회전 엔진**: 조건부 갱신(CAS) 기반 회전과 재사용 탐지
//! - **인증 필터**: 요청별 보안 컨텍스트 설정
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Middlewares   │ ← 인증 필터, 보안 컨텍스트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰 코덱, 회전 엔진
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 토큰 패밀리 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use interview_auth_service::core::AppState;
//! use interview_auth_service::repositories::tokens::InMemoryTokenFamilyStore;
//!
//! let state = AppState::from_config(Arc::new(InMemoryTokenFamilyStore::new()));
//! let tokens = state.rotation.issue_token_pair(&claims).await?;
//! let rotated = state.rotation.rotate(&tokens.refresh_token, &claims).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod middlewares;
