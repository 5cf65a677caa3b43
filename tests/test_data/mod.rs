#![allow(dead_code)]

use showcase_client::entities::{about::AboutData, comment::Comment, prototype::Prototype, user::User};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const USER_SESSION: &str = "SESSION=user-token";
pub const ADMIN_SESSION: &str = "SESSION=admin-token";

pub fn mock_user() -> User {
    User {
        sub: "user-123".into(),
        name: "Test User".into(),
        email: "test@example.com".into(),
        picture: "https://via.placeholder.com/40.png/334155/ffffff?text=TU".into(),
    }
}

pub fn mock_admin() -> User {
    User {
        sub: "admin-sub".into(),
        name: "Admin User".into(),
        email: ADMIN_EMAIL.into(),
        picture: "https://via.placeholder.com/40.png/0891b2/ffffff?text=AU".into(),
    }
}

/// Maps the `SESSION` cookie value to its owner.
pub fn user_for_token(token: &str) -> Option<User> {
    match token {
        "user-token" => Some(mock_user()),
        "admin-token" => Some(mock_admin()),
        _ => None,
    }
}

pub fn mock_prototypes() -> Vec<Prototype> {
    vec![
        Prototype {
            id: Some(1),
            title: "Mocked Prototype 1".into(),
            description: "A cool project about futuristic things.".into(),
            image_url: "https://via.placeholder.com/400x200.png/0f172a/cbd5e1?text=Prototype+1".into(),
            play_url: "https://example.com".into(),
            github_url: "https://github.com".into(),
        },
        Prototype {
            id: Some(2),
            title: "Mocked Prototype 2".into(),
            description: "Another awesome idea, but for space.".into(),
            image_url: "https://via.placeholder.com/400x200.png/0f172a/cbd5e1?text=Prototype+2".into(),
            play_url: "https://example.com".into(),
            github_url: "https://github.com".into(),
        },
    ]
}

/// Comments of prototype 1. Prototype 2 starts without any.
pub fn mock_comments() -> Vec<Comment> {
    vec![
        Comment {
            id: 101,
            content: "This is a great idea!".into(),
            author_name: "Test User".into(),
            author_avatar_url: "https://via.placeholder.com/40.png/334155/ffffff?text=TU".into(),
            user_id: "user-123".into(),
            created_at: "2024-05-01T10:00:00Z".into(),
        },
        Comment {
            id: 102,
            content: "I have some feedback on the controls.".into(),
            author_name: "Admin User".into(),
            author_avatar_url: "https://via.placeholder.com/40.png/0891b2/ffffff?text=AU".into(),
            user_id: "admin-sub".into(),
            created_at: "2024-05-01T11:30:00Z".into(),
        },
    ]
}

pub fn mock_about() -> AboutData {
    AboutData {
        title: "About The Developer".into(),
        image_url: "https://via.placeholder.com/192.png/1e293b/ffffff?text=Dev".into(),
        image_alt: "A picture of the developer".into(),
        content: "This is **mocked** content fetched from `about.json`.".into(),
    }
}
