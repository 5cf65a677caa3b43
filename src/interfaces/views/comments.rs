use crate::{
    entities::{comment::Comment, user::Viewer},
    errors::AppError,
    policy::{can_add_comment, can_edit_comment},
    repositories::comment::CommentRepository,
    use_cases::{
        comments::CommentStore,
        sync_state::{CollectionView, StoreSnapshot},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCardView {
    pub id: i64,
    pub author_name: String,
    pub author_avatar_url: String,
    pub content: String,
    /// `created_at` formatted for display; the raw value if it is not RFC 3339.
    pub posted_at: String,
    pub can_edit: bool,
}

impl CommentCardView {
    pub fn new(comment: &Comment, viewer: &Viewer) -> Self {
        let posted_at = comment
            .posted_at()
            .map(|ts| ts.format("%b %-d, %Y %H:%M").to_string())
            .unwrap_or_else(|| comment.created_at.clone());

        CommentCardView {
            id: comment.id,
            author_name: comment.author_name.clone(),
            author_avatar_url: comment.author_avatar_url.clone(),
            content: comment.content.clone(),
            posted_at,
            can_edit: can_edit_comment(viewer, comment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadBody {
    Loading,
    Failed(String),
    Empty,
    Comments(Vec<CommentCardView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCommentControl {
    Button,
    LoginLink { href: String },
}

impl AddCommentControl {
    pub fn label(&self) -> &'static str {
        match self {
            AddCommentControl::Button => "+ Add Comment",
            AddCommentControl::LoginLink { .. } => "Login to comment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThreadView {
    pub body: ThreadBody,
    pub add_control: AddCommentControl,
}

impl CommentThreadView {
    pub fn build(snapshot: &StoreSnapshot<Comment>, viewer: &Viewer, login_url: &str) -> Self {
        let body = match snapshot.view() {
            CollectionView::Loading => ThreadBody::Loading,
            CollectionView::Failed(error) => ThreadBody::Failed(error.to_string()),
            CollectionView::Ready([]) => ThreadBody::Empty,
            CollectionView::Ready(comments) => {
                ThreadBody::Comments(comments.iter().map(|c| CommentCardView::new(c, viewer)).collect())
            }
        };

        let add_control = if can_add_comment(viewer) {
            AddCommentControl::Button
        } else {
            AddCommentControl::LoginLink { href: login_url.to_string() }
        };

        CommentThreadView { body, add_control }
    }

    pub fn status_message(&self) -> Option<&str> {
        match &self.body {
            ThreadBody::Loading => Some("Loading comments..."),
            ThreadBody::Failed(error) => Some(error.as_str()),
            ThreadBody::Empty => Some("No comments yet. Be the first!"),
            ThreadBody::Comments(_) => None,
        }
    }

    pub fn cards(&self) -> &[CommentCardView] {
        match &self.body {
            ThreadBody::Comments(cards) => cards,
            _ => &[],
        }
    }

    pub fn card(&self, comment_id: i64) -> Option<&CommentCardView> {
        self.cards().iter().find(|c| c.id == comment_id)
    }
}

/// The "add comment" box under a thread.
#[derive(Debug, Default, Clone)]
pub struct CommentComposer {
    pub content: String,
    open: bool,
}

impl CommentComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn abort(&mut self) {
        self.content.clear();
        self.open = false;
    }

    /// Posts the typed content. Returns `Ok(false)` without a request when
    /// the content is blank.
    pub async fn save<R>(&mut self, store: &CommentStore<R>) -> Result<bool, AppError>
    where
        R: CommentRepository,
    {
        if self.content.trim().is_empty() {
            return Ok(false);
        }

        store.add(&self.content).await?;
        self.abort();
        Ok(true)
    }
}

/// Inline editor for a single comment.
#[derive(Debug, Clone)]
pub struct CommentEditor {
    comment_id: i64,
    original: String,
    pub content: String,
    open: bool,
}

impl CommentEditor {
    /// `None` unless `viewer` may edit `comment`.
    pub fn open(viewer: &Viewer, comment: &Comment) -> Option<Self> {
        can_edit_comment(viewer, comment).then(|| CommentEditor {
            comment_id: comment.id,
            original: comment.content.clone(),
            content: comment.content.clone(),
            open: true,
        })
    }

    pub fn comment_id(&self) -> i64 {
        self.comment_id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn cancel(&mut self) {
        self.content = self.original.clone();
        self.open = false;
    }

    /// Sends the edit when the content is not blank and differs from what
    /// was loaded, then closes. A failed request leaves it open.
    pub async fn save<R>(&mut self, store: &CommentStore<R>) -> Result<(), AppError>
    where
        R: CommentRepository,
    {
        if !self.content.trim().is_empty() && self.content != self.original {
            store.edit(self.comment_id, &self.content).await?;
        }

        self.open = false;
        Ok(())
    }

    pub async fn delete<R>(&mut self, store: &CommentStore<R>) -> Result<(), AppError>
    where
        R: CommentRepository,
    {
        store.delete(self.comment_id).await?;
        self.open = false;
        Ok(())
    }
}
