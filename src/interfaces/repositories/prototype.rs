use async_trait::async_trait;

use crate::{entities::prototype::Prototype, errors::AppError, http::client::HttpApi};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrototypeRepository: Send + Sync {
    /// Fetches the full prototype collection
    async fn list_prototypes(&self) -> Result<Vec<Prototype>, AppError>;

    /// Creates a prototype and returns the persisted entity
    async fn create_prototype(&self, prototype: &Prototype) -> Result<Prototype, AppError>;

    /// Replaces the prototype stored under `id`
    async fn update_prototype(&self, id: i64, prototype: &Prototype) -> Result<Prototype, AppError>;

    /// Removes the prototype stored under `id`
    async fn delete_prototype(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
impl PrototypeRepository for HttpApi {
    async fn list_prototypes(&self) -> Result<Vec<Prototype>, AppError> {
        let url = self.api_url("/api/prototypes")?;
        let request = self.client().get(url);

        Ok(self.fetch_json(request, "Failed to fetch prototypes.").await?)
    }

    async fn create_prototype(&self, prototype: &Prototype) -> Result<Prototype, AppError> {
        let url = self.api_url("/api/prototypes")?;
        let request = self.client().post(url).json(prototype);

        Ok(self.fetch_json(request, "Failed to save prototype.").await?)
    }

    async fn update_prototype(&self, id: i64, prototype: &Prototype) -> Result<Prototype, AppError> {
        let url = self.api_url(&format!("/api/prototypes/{id}"))?;
        let request = self.client().put(url).json(prototype);

        Ok(self.fetch_json(request, "Failed to save prototype.").await?)
    }

    async fn delete_prototype(&self, id: i64) -> Result<(), AppError> {
        let url = self.api_url(&format!("/api/prototypes/{id}"))?;
        let request = self.client().delete(url);

        Ok(self.execute(request, "Failed to delete prototype.").await?)
    }
}
