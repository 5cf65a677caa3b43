use async_trait::async_trait;

use crate::{
    entities::comment::{Comment, CommentContent},
    errors::AppError,
    http::client::HttpApi,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fetches every comment attached to a prototype
    async fn list_comments(&self, prototype_id: i64) -> Result<Vec<Comment>, AppError>;

    /// Posts a new comment on a prototype
    async fn create_comment(&self, prototype_id: i64, content: &str) -> Result<(), AppError>;

    /// Replaces the content of a comment
    async fn update_comment(&self, comment_id: i64, content: &str) -> Result<(), AppError>;

    /// Removes a comment
    async fn delete_comment(&self, comment_id: i64) -> Result<(), AppError>;
}

#[async_trait]
impl CommentRepository for HttpApi {
    async fn list_comments(&self, prototype_id: i64) -> Result<Vec<Comment>, AppError> {
        let url = self.api_url(&format!("/api/prototypes/{prototype_id}/comments"))?;
        let request = self.client().get(url);

        Ok(self.fetch_json(request, "Failed to fetch comments.").await?)
    }

    async fn create_comment(&self, prototype_id: i64, content: &str) -> Result<(), AppError> {
        let url = self.api_url(&format!("/api/prototypes/{prototype_id}/comments"))?;
        let request = self.client().post(url).json(&CommentContent::new(content));

        Ok(self.execute(request, "Failed to create comment.").await?)
    }

    async fn update_comment(&self, comment_id: i64, content: &str) -> Result<(), AppError> {
        let url = self.api_url(&format!("/api/comments/{comment_id}"))?;
        let request = self.client().put(url).json(&CommentContent::new(content));

        Ok(self.execute(request, "Failed to update comment.").await?)
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<(), AppError> {
        let url = self.api_url(&format!("/api/comments/{comment_id}"))?;
        let request = self.client().delete(url);

        Ok(self.execute(request, "Failed to delete comment.").await?)
    }
}
