use crate::{repositories::about::AboutRepository, utils::markdown::safe_markdown_to_html};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AboutView {
    Loading,
    Failed(String),
    Loaded {
        title: String,
        image_url: String,
        image_alt: String,
        content_html: String,
    },
}

impl AboutView {
    /// Fetches `/about.json` and renders its Markdown body.
    pub async fn load<R>(about_repo: &R) -> Self
    where
        R: AboutRepository + ?Sized,
    {
        match about_repo.fetch_about().await {
            Ok(about) => AboutView::Loaded {
                content_html: safe_markdown_to_html(&about.content),
                title: about.title,
                image_url: about.image_url,
                image_alt: about.image_alt,
            },
            Err(e) => {
                tracing::warn!("Failed to load about content: {}", e);
                AboutView::Failed(e.to_string())
            }
        }
    }

    pub fn status_message(&self) -> Option<String> {
        match self {
            AboutView::Loading => Some("Loading...".to_string()),
            AboutView::Failed(e) => Some(format!("Error: {e}")),
            AboutView::Loaded { .. } => None,
        }
    }
}
