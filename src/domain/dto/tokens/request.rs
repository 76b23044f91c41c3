use serde::Deserialize;
use validator::Validate;

/// 토큰 갱신 요청 DTO
///
/// 만료되었을 수 있는 액세스 토큰은 본문이 아니라 `Authorization` 헤더로 전달됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰은 필수입니다"))]
    pub refresh_token: String,
}

/// 로그아웃 요청 DTO
///
/// 현재 기기의 리프레시 토큰을 함께 보내면 해당 계보만 폐기합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(length(min = 1, message = "리프레시 토큰은 필수입니다"))]
    pub refresh_token: String,
}
