//! # Authentication Configuration Module
//!
//! JWT 액세스 토큰, 리프레시 토큰 패밀리, 인증 프로바이더 관련 설정을 관리하는 모듈입니다.
//! Spring Security의 JWT 설정과 유사한 역할을 수행합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_ACCESS_TOKEN_MINUTES="30"
//! ```
//!
//! ### 리프레시 토큰 설정
//! ```bash
//! export REFRESH_TOKEN_EXPIRATION_DAYS="14"
//! export REFRESH_TOKEN_PEPPER="server-side-pepper"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{JwtConfig, RefreshTokenConfig};
//!
//! let secret = JwtConfig::secret();
//! let access_minutes = JwtConfig::access_token_minutes();
//! let refresh_days = RefreshTokenConfig::expiration_days();
//! ```

use std::env;

/// JWT 액세스 토큰 설정을 관리하는 구조체
///
/// 액세스 토큰은 짧게, 리프레시 토큰은 길게 유지합니다.
/// 리프레시 토큰 관련 값은 [`RefreshTokenConfig`]가 담당합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명(HS256)에 사용할 비밀키를 반환합니다.
    ///
    /// # 기본값
    ///
    /// 환경 변수가 설정되지 않은 경우 개발용 기본 키를 사용하며 경고 로그가 출력됩니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 액세스 토큰의 유효 기간을 분 단위로 반환합니다.
    ///
    /// 기본값은 30분이며, 0 이하의 값은 기본값으로 대체됩니다.
    pub fn access_token_minutes() -> i64 {
        env::var("JWT_ACCESS_TOKEN_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|minutes| *minutes > 0)
            .unwrap_or(30)
    }
}

/// 리프레시 토큰 패밀리 설정
pub struct RefreshTokenConfig;

impl RefreshTokenConfig {
    /// 리프레시 토큰(패밀리 행)의 유효 기간을 일 단위로 반환합니다.
    ///
    /// 회전할 때마다 새 패밀리 행이 이 기간만큼의 만료 시각으로 생성됩니다.
    /// 기본값은 14일입니다.
    pub fn expiration_days() -> i64 {
        env::var("REFRESH_TOKEN_EXPIRATION_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|days| *days > 0)
            .unwrap_or(14)
    }

    /// 다이제스트 계산 전에 원본 토큰 앞에 붙이는 서버 측 pepper
    ///
    /// 설정하지 않으면 빈 문자열입니다. 값을 바꾸면 기존 리프레시 토큰은 모두 무효가 됩니다.
    pub fn pepper() -> String {
        env::var("REFRESH_TOKEN_PEPPER").unwrap_or_default()
    }
}

/// 사용자 인증 프로바이더
///
/// OAuth 기반 사용자(`OAuthUser`)가 어느 프로바이더에서 왔는지 나타냅니다.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AuthProvider {
    /// 로컬 이메일/패스워드 인증
    Local,
    /// Google OAuth 2.0 인증
    Google,
    /// GitHub OAuth 인증
    GitHub,
    /// Facebook OAuth 인증
    Facebook,
}

impl AuthProvider {
    /// AuthProvider를 소문자 문자열로 변환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
            AuthProvider::GitHub => "github",
            AuthProvider::Facebook => "facebook",
        }
    }
}
