use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::{
    entities::comment::Comment,
    errors::AppError,
    repositories::comment::CommentRepository,
    use_cases::sync_state::{StoreSnapshot, SyncedCollection},
};

/// Authoritative comment thread of one prototype.
///
/// Same contract as the prototype store: every successful mutation is
/// followed by a reload of the thread. There is no focus-triggered reload.
pub struct CommentStore<R>
where
    R: CommentRepository,
{
    pub comment_repo: R,
    prototype_id: i64,
    state: RwLock<SyncedCollection<Comment>>,
}

impl<R> CommentStore<R>
where
    R: CommentRepository,
{
    pub fn new(comment_repo: R, prototype_id: i64) -> Self {
        CommentStore {
            comment_repo,
            prototype_id,
            state: RwLock::new(SyncedCollection::new()),
        }
    }

    pub fn prototype_id(&self) -> i64 {
        self.prototype_id
    }

    pub fn snapshot(&self) -> StoreSnapshot<Comment> {
        self.state.read().snapshot()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.state.read().items().to_vec()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error().map(str::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading()
    }

    pub async fn load(&self) {
        self.state.write().begin_load();

        match self.comment_repo.list_comments(self.prototype_id).await {
            Ok(comments) => {
                debug!(prototype_id = self.prototype_id, count = comments.len(), "comments loaded");
                self.state.write().finish_ok(comments);
            }
            Err(e) => {
                warn!(prototype_id = self.prototype_id, "Failed to load comments: {}", e);
                self.state.write().finish_err(format!("Failed to load comments: {}", e));
            }
        }
    }

    /// Posts `content` as a new comment. Callers skip blank content.
    pub async fn add(&self, content: &str) -> Result<(), AppError> {
        self.comment_repo.create_comment(self.prototype_id, content).await?;
        info!(prototype_id = self.prototype_id, "comment added");

        self.resynchronize().await;
        Ok(())
    }

    pub async fn edit(&self, comment_id: i64, content: &str) -> Result<(), AppError> {
        self.comment_repo.update_comment(comment_id, content).await?;
        info!(prototype_id = self.prototype_id, comment_id, "comment edited");

        self.resynchronize().await;
        Ok(())
    }

    pub async fn delete(&self, comment_id: i64) -> Result<(), AppError> {
        self.comment_repo.delete_comment(comment_id).await?;
        info!(prototype_id = self.prototype_id, comment_id, "comment deleted");

        self.resynchronize().await;
        Ok(())
    }

    async fn resynchronize(&self) {
        self.load().await;
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{api_errors::ApiError, repositories::comment::MockCommentRepository};

    fn comment(id: i64, content: &str, user_id: &str) -> Comment {
        Comment {
            id,
            content: content.to_string(),
            author_name: "Test User".into(),
            author_avatar_url: String::new(),
            user_id: user_id.to_string(),
            created_at: "2024-05-01T10:00:00Z".into(),
        }
    }

    #[tokio::test]
    async fn loads_only_the_scoped_thread() {
        let mut repo = MockCommentRepository::new();
        repo.expect_list_comments()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(vec![comment(101, "This is a great idea!", "user-123")]));

        let store = CommentStore::new(repo, 7);
        assert!(store.is_loading());
        store.load().await;

        assert!(!store.is_loading());
        assert_eq!(store.comments().len(), 1);
    }

    #[tokio::test]
    async fn add_posts_to_own_prototype_then_resyncs() {
        let mut repo = MockCommentRepository::new();
        repo.expect_create_comment()
            .withf(|id, content| *id == 7 && content == "Nice work")
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_list_comments()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(vec![comment(103, "Nice work", "user-123")]));

        let store = CommentStore::new(repo, 7);
        store.add("Nice work").await.unwrap();

        assert_eq!(store.comments()[0].content, "Nice work");
    }

    #[tokio::test]
    async fn edit_and_delete_resync_once_each() {
        let mut repo = MockCommentRepository::new();
        repo.expect_update_comment()
            .withf(|id, content| *id == 101 && content == "Updated")
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_delete_comment()
            .with(eq(102))
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_list_comments()
            .with(eq(1))
            .times(2)
            .returning(|_| Ok(vec![comment(101, "Updated", "user-123")]));

        let store = CommentStore::new(repo, 1);
        store.edit(101, "Updated").await.unwrap();
        store.delete(102).await.unwrap();

        assert_eq!(store.comments(), vec![comment(101, "Updated", "user-123")]);
    }

    #[tokio::test]
    async fn failed_mutation_is_returned_without_resync() {
        let mut repo = MockCommentRepository::new();
        repo.expect_update_comment()
            .times(1)
            .returning(|_, _| Err(AppError::Request(ApiError::Status { status: 500, message: "Failed to update comment.".into() })));
        repo.expect_list_comments().never();

        let store = CommentStore::new(repo, 1);
        let err = store.edit(101, "x").await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to update comment.");
    }

    #[tokio::test]
    async fn failed_load_sets_error_message() {
        let mut repo = MockCommentRepository::new();
        repo.expect_list_comments()
            .times(1)
            .returning(|_| Err(AppError::Request(ApiError::Status { status: 503, message: "Failed to fetch comments.".into() })));

        let store = CommentStore::new(repo, 1);
        store.load().await;

        assert_eq!(
            store.error().as_deref(),
            Some("Failed to load comments: Failed to fetch comments.")
        );
    }
}
