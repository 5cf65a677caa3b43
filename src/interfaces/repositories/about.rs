use async_trait::async_trait;

use crate::{entities::about::AboutData, errors::AppError, http::client::HttpApi};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AboutRepository: Send + Sync {
    /// Retrieves the static "About" content
    async fn fetch_about(&self) -> Result<AboutData, AppError>;
}

#[async_trait]
impl AboutRepository for HttpApi {
    async fn fetch_about(&self) -> Result<AboutData, AppError> {
        let url = self.site_url("/about.json")?;
        let request = self.client().get(url);

        Ok(self.fetch_json(request, "Failed to fetch about data.").await?)
    }
}
