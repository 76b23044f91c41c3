//! # 인증 에러 분류
//!
//! 액세스 토큰 검증과 리프레시 토큰 회전 과정에서 발생하는 에러를 정의합니다.
//!
//! | AuthError | HTTP Status | 코드 |
//! |-----------|-------------|------|
//! | `MissingCredential` | 401 | `MISSING_CREDENTIAL` |
//! | `InvalidAccessToken` | 401 | `INVALID_ACCESS_TOKEN` |
//! | `InvalidRefreshToken` | 401 | `INVALID_REFRESH_TOKEN` |
//! | `TokenFamilyNotFound` | 401 | `TOKEN_FAMILY_NOT_FOUND` |
//! | `FamilyRevoked` | 401 | `FAMILY_REVOKED` |
//! | `TokenReuseDetected` | 401 | `TOKEN_REUSE_DETECTED` |
//! | `FamilyOwnershipMismatch` | 403 | `FAMILY_OWNERSHIP_MISMATCH` |
//! | `InactiveAccount` | 403 | `INACTIVE_ACCOUNT` |
//! | `TokenHashingFailed` | 500 | `TOKEN_HASHING_FAILED` |
//!
//! `TokenHashingFailed`를 제외한 모든 변형은 "인증 실패"로 취급되어
//! 인증 필터에서 요청을 즉시 차단합니다.

use std::fmt;
use actix_web::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// 토큰이 거부된 구체적인 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenFailureReason {
    /// 만료 시각이 지남
    Expired,
    /// 구조가 올바르지 않음 (디코딩 불가, 필수 클레임 누락 등)
    Malformed,
    /// 서명 검증 실패
    SignatureMismatch,
    /// 저장된 다이제스트와 제시된 토큰의 다이제스트가 다름
    DigestMismatch,
}

impl TokenFailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenFailureReason::Expired => "expired",
            TokenFailureReason::Malformed => "malformed",
            TokenFailureReason::SignatureMismatch => "signature-mismatch",
            TokenFailureReason::DigestMismatch => "digest-mismatch",
        }
    }
}

impl fmt::Display for TokenFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 인증 서브시스템 에러
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// 자격 증명이 필요한 곳에 토큰이 없음
    #[error("Missing credential")]
    MissingCredential,

    #[error("Invalid access token: {0}")]
    InvalidAccessToken(TokenFailureReason),

    #[error("Invalid refresh token: {0}")]
    InvalidRefreshToken(TokenFailureReason),

    #[error("Token family not found: {0}")]
    TokenFamilyNotFound(Uuid),

    /// 패밀리 소유 계정과 요청자가 주장하는 계정이 다름
    #[error("Token family {family_id} does not belong to account {claimed_account_id}")]
    FamilyOwnershipMismatch {
        family_id: Uuid,
        claimed_account_id: i64,
    },

    #[error("Token family revoked: {0}")]
    FamilyRevoked(Uuid),

    /// 이미 사용된 리프레시 토큰이 다시 제시됨 (탈취 의심)
    #[error("Refresh token reuse detected for family {0}")]
    TokenReuseDetected(Uuid),

    #[error("Account {0} is not active")]
    InactiveAccount(i64),

    /// 해시 프리미티브 실패. 요청 단위로 치명적이며 재시도하지 않습니다.
    #[error("Token hashing failed: {0}")]
    TokenHashingFailed(String),
}

impl AuthError {
    /// 인증 필터가 요청을 차단해야 하는 "명시적 인증 실패"인지 여부
    pub fn is_auth_failure(&self) -> bool {
        !matches!(self, AuthError::TokenHashingFailed(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::FamilyOwnershipMismatch { .. } | AuthError::InactiveAccount(_) => {
                StatusCode::FORBIDDEN
            }
            AuthError::TokenHashingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// 클라이언트가 분기할 수 있는 고정 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "MISSING_CREDENTIAL",
            AuthError::InvalidAccessToken(_) => "INVALID_ACCESS_TOKEN",
            AuthError::InvalidRefreshToken(_) => "INVALID_REFRESH_TOKEN",
            AuthError::TokenFamilyNotFound(_) => "TOKEN_FAMILY_NOT_FOUND",
            AuthError::FamilyOwnershipMismatch { .. } => "FAMILY_OWNERSHIP_MISMATCH",
            AuthError::FamilyRevoked(_) => "FAMILY_REVOKED",
            AuthError::TokenReuseDetected(_) => "TOKEN_REUSE_DETECTED",
            AuthError::InactiveAccount(_) => "INACTIVE_ACCOUNT",
            AuthError::TokenHashingFailed(_) => "TOKEN_HASHING_FAILED",
        }
    }

    /// 응답 본문의 사용자용 메시지
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "유효한 인증 토큰이 필요합니다",
            AuthError::InvalidAccessToken(TokenFailureReason::Expired) => "액세스 토큰이 만료되었습니다",
            AuthError::InvalidAccessToken(_) => "유효하지 않은 액세스 토큰입니다",
            AuthError::InvalidRefreshToken(TokenFailureReason::Expired) => "리프레시 토큰이 만료되었습니다",
            AuthError::InvalidRefreshToken(_) => "유효하지 않은 리프레시 토큰입니다",
            AuthError::TokenFamilyNotFound(_) => "리프레시 토큰을 찾을 수 없습니다",
            AuthError::FamilyOwnershipMismatch { .. } => "다른 계정의 리프레시 토큰입니다",
            AuthError::FamilyRevoked(_) => "폐기된 리프레시 토큰입니다",
            AuthError::TokenReuseDetected(_) => "이미 사용된 리프레시 토큰입니다. 다시 로그인해주세요",
            AuthError::InactiveAccount(_) => "계정이 비활성화되었습니다",
            AuthError::TokenHashingFailed(_) => "토큰 처리 중 서버 오류가 발생했습니다",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_hashing_failure_is_not_auth_failure() {
        let family_id = Uuid::new_v4();
        let failures = vec![
            AuthError::MissingCredential,
            AuthError::InvalidAccessToken(TokenFailureReason::Expired),
            AuthError::InvalidRefreshToken(TokenFailureReason::DigestMismatch),
            AuthError::TokenFamilyNotFound(family_id),
            AuthError::FamilyOwnershipMismatch { family_id, claimed_account_id: 2 },
            AuthError::FamilyRevoked(family_id),
            AuthError::TokenReuseDetected(family_id),
            AuthError::InactiveAccount(1),
        ];

        for failure in failures {
            assert!(failure.is_auth_failure(), "{:?}", failure);
        }
        assert!(!AuthError::TokenHashingFailed("boom".to_string()).is_auth_failure());
    }

    #[test]
    fn test_status_codes() {
        let family_id = Uuid::new_v4();

        assert_eq!(
            AuthError::TokenReuseDetected(family_id).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::FamilyOwnershipMismatch { family_id, claimed_account_id: 7 }.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::TokenHashingFailed("misconfigured".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(TokenFailureReason::Expired.to_string(), "expired");
        assert_eq!(TokenFailureReason::Malformed.to_string(), "malformed");
        assert_eq!(TokenFailureReason::SignatureMismatch.to_string(), "signature-mismatch");
        assert_eq!(
            AuthError::InvalidAccessToken(TokenFailureReason::SignatureMismatch).to_string(),
            "Invalid access token: signature-mismatch"
        );
    }
}
