use async_trait::async_trait;

use crate::{entities::user::User, errors::AppError, http::client::HttpApi};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetches the identity bound to the current session cookie
    async fn current_user(&self) -> Result<User, AppError>;

    /// Ends the backend session
    async fn logout(&self) -> Result<(), AppError>;

    /// Entry point of the backend's OAuth flow. No network access.
    fn login_url(&self) -> String;
}

#[async_trait]
impl SessionRepository for HttpApi {
    async fn current_user(&self) -> Result<User, AppError> {
        let url = self.api_url("/api/user")?;
        let request = self.client().get(url);

        Ok(self.fetch_json(request, "User not authenticated").await?)
    }

    async fn logout(&self) -> Result<(), AppError> {
        let url = self.api_url("/api/logout")?;
        let request = self.client().post(url);

        Ok(self.execute(request, "Logout failed.").await?)
    }

    fn login_url(&self) -> String {
        format!("{}/oauth2/authorization/{}", self.base_url(), self.login_provider())
    }
}
