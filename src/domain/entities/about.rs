use serde::{Deserialize, Serialize};

/// Static content served as `/about.json`. `content` is Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutData {
    pub title: String,
    pub image_url: String,
    pub image_alt: String,
    pub content: String,
}
