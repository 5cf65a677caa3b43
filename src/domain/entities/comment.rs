use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A remark on one prototype. Author metadata is filled in by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_avatar_url: String,
    pub user_id: String,
    #[serde(default)]
    pub created_at: String,
}

impl Comment {
    /// `created_at` as a UTC timestamp, when the backend sent RFC 3339.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// Body of comment create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentContent {
    pub content: String,
}

impl CommentContent {
    pub fn new(content: impl Into<String>) -> Self {
        CommentContent { content: content.into() }
    }
}
