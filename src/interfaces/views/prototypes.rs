use crate::{
    entities::{
        prototype::{is_http_link, Prototype, PrototypeDraft},
        user::Viewer,
    },
    errors::{AppError, FieldError},
    policy::can_manage_prototypes,
    repositories::prototype::PrototypeRepository,
    use_cases::{
        prototypes::PrototypeStore,
        sync_state::{CollectionView, StoreSnapshot},
    },
};

// ───── List & Cards ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrototypeCardView {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    /// Only set when the stored value is an http(s) link.
    pub image_url: Option<String>,
    pub play_url: Option<String>,
    pub github_url: Option<String>,
    /// Edit and delete controls.
    pub can_manage: bool,
}

impl PrototypeCardView {
    pub fn new(prototype: &Prototype, viewer: &Viewer) -> Self {
        let link = |url: &str| is_http_link(url).then(|| url.to_string());

        PrototypeCardView {
            id: prototype.id,
            title: prototype.title.clone(),
            description: prototype.description.clone(),
            image_url: link(&prototype.image_url),
            play_url: link(&prototype.play_url),
            github_url: link(&prototype.github_url),
            can_manage: can_manage_prototypes(viewer),
        }
    }

    pub fn image_alt(&self) -> String {
        format!("Screenshot of {}", self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrototypeListView {
    Loading,
    Failed(String),
    Ready {
        can_add: bool,
        cards: Vec<PrototypeCardView>,
    },
}

impl PrototypeListView {
    pub fn build(snapshot: &StoreSnapshot<Prototype>, viewer: &Viewer) -> Self {
        match snapshot.view() {
            CollectionView::Loading => PrototypeListView::Loading,
            CollectionView::Failed(error) => PrototypeListView::Failed(error.to_string()),
            CollectionView::Ready(prototypes) => PrototypeListView::Ready {
                can_add: can_manage_prototypes(viewer),
                cards: prototypes.iter().map(|p| PrototypeCardView::new(p, viewer)).collect(),
            },
        }
    }

    pub fn status_message(&self) -> Option<String> {
        match self {
            PrototypeListView::Loading => Some("Loading Prototypes...".to_string()),
            PrototypeListView::Failed(error) => Some(format!("Error: {error}")),
            PrototypeListView::Ready { cards, .. } if cards.is_empty() => Some("No prototypes found.".to_string()),
            PrototypeListView::Ready { .. } => None,
        }
    }

    pub fn cards(&self) -> &[PrototypeCardView] {
        match self {
            PrototypeListView::Ready { cards, .. } => cards,
            _ => &[],
        }
    }

    pub fn titles(&self) -> Vec<&str> {
        self.cards().iter().map(|c| c.title.as_str()).collect()
    }

    /// Whether the "add prototype" button is shown.
    pub fn can_add(&self) -> bool {
        matches!(self, PrototypeListView::Ready { can_add: true, .. })
    }

    /// Whether any edit or delete control is shown.
    pub fn has_manage_controls(&self) -> bool {
        self.can_add() || self.cards().iter().any(|c| c.can_manage)
    }
}

// ───── Editor Form ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(i64),
}

/// The add/edit prototype form.
///
/// Invalid input is reported per field and never sent. A failed request
/// leaves the form open with its input intact so the user can retry.
#[derive(Debug, Clone)]
pub struct PrototypeEditor {
    mode: EditorMode,
    pub form: PrototypeDraft,
    errors: Vec<FieldError>,
    submit_error: Option<String>,
    open: bool,
}

impl PrototypeEditor {
    pub fn create() -> Self {
        PrototypeEditor {
            mode: EditorMode::Create,
            form: PrototypeDraft::default(),
            errors: Vec::new(),
            submit_error: None,
            open: true,
        }
    }

    /// Opens the form pre-filled with `prototype`. Returns `None` for a
    /// prototype the backend has not assigned an id yet.
    pub fn edit(prototype: &Prototype) -> Option<Self> {
        let id = prototype.id?;
        Some(PrototypeEditor {
            mode: EditorMode::Edit(id),
            form: prototype.draft(),
            errors: Vec::new(),
            submit_error: None,
            open: true,
        })
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Add New Prototype",
            EditorMode::Edit(_) => "Edit Prototype",
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub async fn submit<R>(&mut self, store: &PrototypeStore<R>) -> Result<(), AppError>
    where
        R: PrototypeRepository,
    {
        let result = match self.mode {
            EditorMode::Create => store.create(self.form.clone()).await,
            EditorMode::Edit(id) => store.update(self.form.clone().into_prototype(Some(id))).await,
        };

        match result {
            Ok(_) => {
                self.errors.clear();
                self.submit_error = None;
                self.open = false;
                Ok(())
            }
            Err(e) => {
                self.errors = e.field_errors().to_vec();
                self.submit_error = e.field_errors().is_empty().then(|| e.to_string());
                Err(e)
            }
        }
    }
}
