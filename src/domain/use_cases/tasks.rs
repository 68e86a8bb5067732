use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::task::{NewTaskRequest, Task, UpdateTaskStatusRequest},
    errors::AppError,
    repositories::task::TaskRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct TaskHandler {
    pub task_repo: Arc<dyn TaskRepository>,
}

impl TaskHandler {
    pub fn new(task_repo: Arc<dyn TaskRepository>) -> Self {
        TaskHandler { task_repo }
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        self.task_repo.list_tasks().await
    }

    pub async fn create_task(&self, created_by: Uuid, request: NewTaskRequest) -> Result<Task, AppError> {
        request.validate()?;
        if request.title.trim().is_empty() {
            return Err(AppError::field("title", "Title cannot be blank"));
        }

        let task = self.task_repo.create_task(&request.into_insert(created_by)).await?;
        tracing::info!(task_id = %task.id, "Task created");
        Ok(task)
    }

    pub async fn update_task_status(&self, id: &str, request: UpdateTaskStatusRequest) -> Result<Task, AppError> {
        let valid_id = valid_uuid(id)?;
        self.task_repo.update_task_status(&valid_id, request.status).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.task_repo.delete_task(&valid_id).await?;
        tracing::info!(task_id = %valid_id, "Task deleted");
        Ok(())
    }
}
