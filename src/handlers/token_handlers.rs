use actix_web::{delete, get, post, web, HttpRequest, HttpResponse, ResponseError};
use validator::Validate;
use crate::core::app_state::AppState;
use crate::core::auth_error::AuthError;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::{
    ApiResponse, CurrentUserResponse, LogoutRequest, RefreshTokenRequest, RevocationResponse,
};
use crate::domain::models::auth::AuthenticatedUser;

const ADMIN_ROLE: &str = "admin";

/// 에러를 응답으로 변환합니다. 인증 실패는 요청 경로를 포함한 진입점 응답을 사용합니다.
fn failure_response(state: &AppState, req: &HttpRequest, err: AppError) -> HttpResponse {
    match err.as_auth_failure() {
        Some(auth_error) => {
            log::warn!("인증 실패: {} ({})", auth_error, req.path());
            state.entry_point.commence(req.path(), auth_error)
        }
        None => err.error_response(),
    }
}

fn validate<T: Validate>(body: &T) -> AppResult<()> {
    body.validate()
        .map_err(|e| AppError::ValidationError(format!("입력값 검증 실패: {}", e)))
}

/// 토큰 갱신 API 핸들러
///
/// 인증 필터 밖에서 동작합니다. `Authorization` 헤더의 액세스 토큰은 만료되었어도
/// 서명이 유효하면 요청자 신원으로 사용됩니다.
#[post("/refresh")]
pub async fn refresh_token_handler(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    let result: AppResult<_> = async {
        validate(&*body)?;

        let access_token = state
            .token_extractor
            .extract(req.headers())
            .ok_or(AuthError::MissingCredential)?;
        let caller = state.codec.verify_allow_expired(&access_token)?;

        state.rotation.rotate(&body.refresh_token, &caller).await
    }
    .await;

    match result {
        Ok(tokens) => HttpResponse::Ok().json(ApiResponse::success(tokens)),
        Err(err) => failure_response(&state, &req, err),
    }
}

/// 로그아웃 API 핸들러
///
/// 제시된 리프레시 토큰이 속한 계보를 폐기합니다.
#[post("/logout")]
pub async fn logout_handler(
    req: HttpRequest,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<LogoutRequest>,
) -> HttpResponse {
    let result: AppResult<_> = async {
        validate(&*body)?;
        state.rotation.revoke(&body.refresh_token, user.user_id()).await
    }
    .await;

    match result {
        Ok(revoked) => HttpResponse::Ok().json(ApiResponse::with_message(
            RevocationResponse { affected: revoked as u64 },
            "로그아웃이 성공적으로 처리되었습니다",
        )),
        Err(err) => failure_response(&state, &req, err),
    }
}

/// 모든 세션 강제 종료 API
#[post("/revoke-all")]
pub async fn revoke_all_tokens_handler(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let revoked = state.rotation.revoke_all(user.user_id()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        RevocationResponse { affected: revoked },
        "모든 세션이 종료되었습니다",
    )))
}

/// 현재 사용자 정보 조회 API
#[get("/me")]
pub async fn current_user_handler(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(CurrentUserResponse::from(&user)))
}

/// 만료된 토큰 패밀리 정리 API (관리자용)
#[delete("/token-families/expired")]
pub async fn purge_expired_families_handler(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    if !user.has_role(ADMIN_ROLE) {
        log::warn!("권한 부족: 사용자 ID {} ({:?}), 필요 권한: {}", user.user_id(), user.roles(), ADMIN_ROLE);
        return Err(AppError::AuthorizationError(format!(
            "사용자 {}는 관리자 권한이 없습니다",
            user.user_id()
        )));
    }

    let deleted = state.rotation.purge_expired().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(RevocationResponse { affected: deleted })))
}
