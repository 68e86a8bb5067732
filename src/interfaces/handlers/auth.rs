use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::token::RefreshTokenRequest;
use crate::entities::user::{SignInRequest, SignOutRequest, SignUpRequest};
use crate::errors::{AppError, AuthError};
use crate::AppState;

#[post("/sign-up")]
#[instrument(skip(state, user))]
pub async fn sign_up(
    state: web::Data<AppState>,
    user: web::Json<SignUpRequest>
) -> Result<impl Responder, AppError> {
    let response = state.auth_handler.register(user.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/sign-in")]
#[instrument(skip(state, user))]
pub async fn sign_in(
    state: web::Data<AppState>,
    user: web::Json<SignInRequest>
) -> Result<impl Responder, AuthError> {
    let auth_response = state.auth_handler.login(user.into_inner()).await?;
    Ok(HttpResponse::Ok().json(auth_response))
}

#[post("/refresh-token")]
#[instrument(skip(state, request))]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<impl Responder, AuthError> {
    let auth_response = state.auth_handler.refresh_token(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(auth_response))
}

#[post("/sign-out")]
#[instrument(skip(request, state, body))]
pub async fn sign_out(
    request: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SignOutRequest>
) -> Result<impl Responder, AuthError> {
    let access_token = bearer_token(&request).ok_or(AuthError::MissingCredentials)?;

    state.auth_handler.sign_out(&access_token, &body.refresh_token).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Signed out successfully"})))
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
