use serde::{Deserialize, Serialize};

/// Identity payload returned by `GET /api/user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub sub: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub picture: String,
}

/// Who is looking at the site. Derived on each resolution, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Viewer {
    #[default]
    Anonymous,
    Authenticated(User),
    Admin(User),
}

impl Viewer {
    /// Classifies `user` against the configured admin address (exact match).
    pub fn from_user(user: Option<User>, admin_email: &str) -> Self {
        match user {
            Some(user) if !admin_email.is_empty() && user.email == admin_email => Viewer::Admin(user),
            Some(user) => Viewer::Authenticated(user),
            None => Viewer::Anonymous,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Authenticated(user) | Viewer::Admin(user) => Some(user),
        }
    }

    pub fn subject(&self) -> Option<&str> {
        self.user().map(|u| u.sub.as_str())
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Viewer::Admin(_))
    }

    pub fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }
}
