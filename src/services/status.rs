use std::sync::Arc;
use uuid::Uuid;

use crate::dto::StatusDto;
use crate::error::AppError;
use crate::ports::StatusRepository;

#[derive(Clone)]
pub struct StatusService {
    repository: Arc<dyn StatusRepository>,
}

impl StatusService {
    pub fn new(repository: Arc<dyn StatusRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, name: &str) -> Result<StatusDto, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Status name must not be empty".to_string()));
        }

        let status = self.repository.create(name).await?;
        tracing::info!(status_id = %status.id, name = %status.name, "Status created");
        Ok(status.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<StatusDto, AppError> {
        Ok(self.repository.find_by_id(id).await?.into())
    }

    pub async fn get_all(&self) -> Result<Vec<StatusDto>, AppError> {
        let statuses = self.repository.find_all().await?;
        Ok(statuses.into_iter().map(StatusDto::from).collect())
    }
}
