use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::{into_field_errors, AppError, FieldError};

// ───── Constants ──────────────────────────────────────────────────────
pub const MAX_FIELD_LENGTH: u64 = 255;

const DUPLICATE_TITLE: &str = "This title already exists.";

// ───── Wire Model ────────────────────────────────────────────────────

/// A showcased project as the backend reports it.
///
/// `id` is `None` until the backend has persisted the prototype.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prototype {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub play_url: String,
    #[serde(default)]
    pub github_url: String,
}

impl Prototype {
    /// Editable fields of this prototype, as pre-filled into an edit form.
    pub fn draft(&self) -> PrototypeDraft {
        PrototypeDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            play_url: self.play_url.clone(),
            github_url: self.github_url.clone(),
        }
    }
}

// ───── Input & Validation ───────────────────────────────────────────

/// Form data for creating or updating a prototype.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct PrototypeDraft {
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[validate(length(max = MAX_FIELD_LENGTH, message = "Description cannot exceed 255 characters."))]
    pub description: String,

    #[validate(length(max = MAX_FIELD_LENGTH, message = "Image URL cannot exceed 255 characters."))]
    pub image_url: String,

    #[validate(custom(function = "validate_play_url"))]
    pub play_url: String,

    #[validate(custom(function = "validate_github_url"))]
    pub github_url: String,
}

impl PrototypeDraft {
    pub fn new(title: impl Into<String>) -> Self {
        PrototypeDraft {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Runs the field rules plus title uniqueness against `existing`.
    ///
    /// `editing` is the id of the prototype being edited; its own title does
    /// not count as a duplicate.
    pub fn validate_against<'a, I>(&self, existing: I, editing: Option<i64>) -> Result<(), AppError>
    where
        I: IntoIterator<Item = &'a Prototype>,
    {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => into_field_errors(e),
        };

        let title_ok = !errors.iter().any(|e| e.field == "title");
        if title_ok && existing.into_iter().any(|p| p.title == self.title && (editing.is_none() || p.id != editing)) {
            errors.push(FieldError::new("title", DUPLICATE_TITLE));
            errors.sort_by(|a, b| a.field.cmp(&b.field));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(errors))
        }
    }

    pub fn into_prototype(self, id: Option<i64>) -> Prototype {
        Prototype {
            id,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            play_url: self.play_url,
            github_url: self.github_url,
        }
    }
}

/// Whether a stored link is usable as an outbound href.
pub fn is_http_link(url: &str) -> bool {
    !url.is_empty() && url.starts_with("http")
}

// ───── Helper Functions ─────────────────────────────────────────────

fn char_len(value: &str) -> u64 {
    value.chars().count() as u64
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(new_validation_error("title_empty", "Title cannot be empty."));
    }
    if char_len(title) > MAX_FIELD_LENGTH {
        return Err(new_validation_error("title_length", "Title cannot exceed 255 characters."));
    }
    Ok(())
}

pub fn validate_play_url(url: &str) -> Result<(), ValidationError> {
    validate_link(url, "Play URL cannot exceed 255 characters.")
}

pub fn validate_github_url(url: &str) -> Result<(), ValidationError> {
    validate_link(url, "GitHub URL cannot exceed 255 characters.")
}

/// Optional link: empty is fine, otherwise it must start with `http`.
fn validate_link(url: &str, too_long: &'static str) -> Result<(), ValidationError> {
    if !url.is_empty() && !url.starts_with("http") {
        return Err(new_validation_error("url_scheme", "URL must start with http."));
    }
    if char_len(url) > MAX_FIELD_LENGTH {
        return Err(new_validation_error("url_length", too_long));
    }
    Ok(())
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}
