use tracing::{debug, error, info, warn};

use crate::{
    entities::user::{User, Viewer},
    errors::AppError,
    repositories::session::SessionRepository,
};

/// Answers "who is looking" and "is it the admin".
pub struct SessionResolver<S>
where
    S: SessionRepository,
{
    pub session_repo: S,
    admin_email: String,
}

impl<S> SessionResolver<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: S, admin_email: impl Into<String>) -> Self {
        SessionResolver {
            session_repo,
            admin_email: admin_email.into(),
        }
    }

    /// The signed-in user, or `None`.
    ///
    /// An outage is reported the same way as a missing session; only the log
    /// level tells them apart.
    pub async fn current_user(&self) -> Option<User> {
        match self.session_repo.current_user().await {
            Ok(user) => Some(user),
            Err(AppError::UnauthorizedAccess | AppError::ForbiddenAccess) => {
                debug!("No active session");
                None
            }
            Err(e) => {
                warn!("Identity check failed, treating viewer as anonymous: {}", e);
                None
            }
        }
    }

    pub async fn resolve_viewer(&self) -> Viewer {
        Viewer::from_user(self.current_user().await, &self.admin_email)
    }

    pub async fn is_admin(&self) -> bool {
        self.resolve_viewer().await.is_admin()
    }

    pub fn login_url(&self) -> String {
        self.session_repo.login_url()
    }

    /// Ends the backend session. Failures are logged and returned so the
    /// caller can offer a retry; the caller reloads on success.
    pub async fn logout(&self) -> Result<(), AppError> {
        match self.session_repo.logout().await {
            Ok(()) => {
                info!("Logged out");
                Ok(())
            }
            Err(e) => {
                error!("Failed to logout: {}", e);
                Err(e)
            }
        }
    }
}
