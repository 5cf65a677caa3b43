//! Permission checks for the presentation layer. Pure functions over an
//! already-resolved viewer; no I/O.

use crate::entities::{comment::Comment, user::Viewer};

/// A comment may be edited by the admin or by its author.
pub fn can_edit_comment(viewer: &Viewer, comment: &Comment) -> bool {
    viewer.is_admin() || viewer.subject() == Some(comment.user_id.as_str())
}

/// Create, edit and delete controls for prototypes are admin-only.
pub fn can_manage_prototypes(viewer: &Viewer) -> bool {
    viewer.is_admin()
}

/// Anyone signed in may add comments.
pub fn can_add_comment(viewer: &Viewer) -> bool {
    viewer.is_signed_in()
}
