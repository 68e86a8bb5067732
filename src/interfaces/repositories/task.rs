use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::task::{Task, TaskInsert, TaskStatus},
    errors::AppError,
    repositories::sqlx_repo::SqlxTaskRepo,
};

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError>;
    async fn create_task(&self, task: &TaskInsert) -> Result<Task, AppError>;
    async fn update_task_status(&self, id: &Uuid, status: TaskStatus) -> Result<Task, AppError>;
    async fn delete_task(&self, id: &Uuid) -> Result<(), AppError>;
    async fn count_by_status(&self) -> Result<Vec<(TaskStatus, i64)>, AppError>;
}

impl SqlxTaskRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxTaskRepo { pool }
    }
}

#[async_trait]
impl TaskRepository for SqlxTaskRepo {
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>("SELECT * FROM tasks ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn create_task(&self, task: &TaskInsert) -> Result<Task, AppError> {
        let created = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, priority, status, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.status)
        .bind(task.created_by)
        .bind(task.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_task_status(&self, id: &Uuid, status: TaskStatus) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>("UPDATE tasks SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    async fn delete_task(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }

        Ok(())
    }

    async fn count_by_status(&self) -> Result<Vec<(TaskStatus, i64)>, AppError> {
        let rows: Vec<(TaskStatus, i64)> = sqlx::query_as("SELECT status, COUNT(*) FROM tasks GROUP BY status")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
