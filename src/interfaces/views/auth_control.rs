use crate::entities::user::Viewer;

/// The header's login/logout control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthControl {
    Login { href: String },
    Account { name: String, picture: String },
}

impl AuthControl {
    pub fn for_viewer(viewer: &Viewer, login_url: &str) -> Self {
        match viewer.user() {
            Some(user) => AuthControl::Account {
                name: user.name.clone(),
                picture: user.picture.clone(),
            },
            None => AuthControl::Login {
                href: login_url.to_string(),
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthControl::Login { .. } => "Login",
            AuthControl::Account { .. } => "Logout",
        }
    }
}
