use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::chat::SendMessageRequest, errors::AppError, AppState};

pub async fn greeting(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.chat_handler.greeting())
}

#[instrument(skip(state, data))]
pub async fn send_message(
    state: web::Data<AppState>,
    data: web::Json<SendMessageRequest>,
) -> Result<impl Responder, AppError> {
    let exchange = state.chat_handler.send_message(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(exchange))
}
