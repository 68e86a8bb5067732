use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::AuthClaims, AppState};

#[instrument(skip(state, claims))]
pub async fn me(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let user = state.auth_handler.session(&claims.0).await?;
    Ok(HttpResponse::Ok().json(user))
}
