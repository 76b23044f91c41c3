//! # Application Error Handling System
//!
//! 인증 서비스를 위한 통합 에러 처리 시스템입니다.
//! Spring Framework의 `@ExceptionHandler`와 글로벌 에러 처리 메커니즘을
//! Rust의 타입 시스템과 결합하여 일관된 에러 처리를 제공합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패 |
//! | `AuthorizationError` | 403 Forbidden | 권한 부족 |
//! | `Auth` | [`AuthError::status_code`] 참조 | 토큰/패밀리 관련 인증 실패 |
//! | `DatabaseError` | 500 Internal Server Error | 데이터베이스 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 모든 에러 응답은 `{code, message, detail, timestamp}` 형식의 JSON 본문을 가집니다.
//! 요청 경로(`path`)가 필요한 인증 실패 응답은 인증 진입점
//! (`middlewares::entry_point`)에서 생성합니다.

use actix_web::http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error;
use crate::core::auth_error::AuthError;
use crate::domain::dto::ErrorResponse;

/// 애플리케이션 전역 에러 타입
///
/// `thiserror` 크레이트를 사용하여 자동으로 `Error` trait을 구현하고,
/// `actix_web::ResponseError`를 구현하여 HTTP 응답으로 자동 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    ///
    /// MongoDB 연산 중 발생하는 오류를 나타냅니다.
    ///
    /// # 예제
    /// ```rust,ignore
    /// collection.insert_one(doc).await
    ///     .map_err(|e| AppError::DatabaseError(
    ///         format!("Failed to insert token family: {}", e)
    ///     ))?;
    /// ```
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 토큰 및 토큰 패밀리 인증 에러
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 인증 필터가 요청을 차단해야 하는 인증 실패라면 해당 [`AuthError`]를 반환합니다.
    pub fn as_auth_failure(&self) -> Option<&AuthError> {
        match self {
            AppError::Auth(err) if err.is_auth_failure() => Some(err),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthorizationError(_) => "FORBIDDEN",
            AppError::Auth(err) => err.code(),
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// 응답 본문의 사용자용 메시지
    ///
    /// 5xx 에러는 내부 정보를 노출하지 않도록 일반 메시지만 반환합니다.
    pub fn message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::AuthorizationError(_) => "접근 권한이 부족합니다".to_string(),
            AppError::Auth(err) => err.message().to_string(),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "서버 내부 오류가 발생했습니다".to_string()
            }
        }
    }

    /// path 정보를 포함한 표준 에러 본문을 생성합니다.
    pub fn to_error_response(&self, path: Option<String>) -> ErrorResponse {
        let detail = match self.status_code() {
            status if status.is_server_error() => None,
            _ => Some(self.to_string()),
        };

        ErrorResponse::new(self.code(), self.message(), detail, path)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::Auth(err) => err.status_code(),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러의 경우 서버 로그에 자세한 정보를 기록하되,
    /// 클라이언트에는 민감한 내부 정보를 노출하지 않습니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(status).json(self.to_error_response(None))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// let families = self.families.read().context("token family store lock poisoned")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
