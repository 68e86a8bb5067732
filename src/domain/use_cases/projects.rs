use std::sync::Arc;

use uuid::Uuid;

use crate::{
    entities::{
        project::{NewProjectRequest, Project, UpdateProjectRequest},
        token::Claims,
    },
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
}

impl ProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        ProjectHandler { project_repo }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await
    }

    pub async fn get_recent_projects(&self, limit: u32) -> Result<Vec<Project>, AppError> {
        self.project_repo.get_recent_projects(limit).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.get_project_by_id(&valid_id).await
    }

    pub async fn create_project(&self, created_by: Uuid, request: NewProjectRequest) -> Result<Project, AppError> {
        let insert = request.into_insert(created_by)?;
        let project = self.project_repo.create_project(&insert).await?;
        tracing::info!(project_id = %project.id, "Project created");
        Ok(project)
    }

    /// Only the creator or an admin may edit a project.
    pub async fn update_project(
        &self,
        claims: &Claims,
        id: &str,
        patch: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        let current = self.project_repo.get_project_by_id(&valid_id).await?;

        if !claims.admin && claims.sub != current.created_by.to_string() {
            tracing::warn!(project_id = %valid_id, user = %claims.sub, "Project edit denied");
            return Err(AppError::ForbiddenAccess);
        }

        let changes = patch.resolve(&current)?;
        self.project_repo.update_project(&valid_id, &changes).await
    }
}
