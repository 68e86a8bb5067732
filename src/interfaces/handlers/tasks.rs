use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::task::{NewTaskRequest, UpdateTaskStatusRequest},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_tasks(_claims: AdminClaims, state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let tasks = state.task_handler.list_tasks().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

#[instrument(skip(claims, state, data))]
pub async fn create_task(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewTaskRequest>,
) -> Result<impl Responder, AppError> {
    let created_by = valid_uuid(&claims.0.sub)?;
    let task = state.task_handler.create_task(created_by, data.into_inner()).await?;
    Ok(HttpResponse::Created().json(task))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_task_status(
    _claims: AdminClaims,
    task_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateTaskStatusRequest>,
) -> Result<impl Responder, AppError> {
    let task = state.task_handler.update_task_status(&task_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

#[instrument(skip(_claims, state))]
pub async fn delete_task(
    _claims: AdminClaims,
    task_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.task_handler.delete_task(&task_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
