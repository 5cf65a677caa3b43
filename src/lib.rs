use std::sync::Arc;

use dashmap::DashMap;
use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use tracing::info;

mod domain;
mod infrastructure;
mod interfaces;
pub mod api_errors;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, policy, use_cases};
pub use infrastructure::{http, utils};
pub use interfaces::{repositories, views};

use entities::user::Viewer;
use errors::AppError;
use http::client::HttpApi;
use repositories::{
    about::AboutRepository, comment::CommentRepository, prototype::PrototypeRepository,
    session::SessionRepository,
};
use use_cases::{
    comments::CommentStore,
    focus::{FocusEvents, FocusSubscription},
    prototypes::PrototypeStore,
    session::SessionResolver,
};
use views::{
    about::AboutView, auth_control::AuthControl, comments::CommentThreadView,
    prototypes::PrototypeListView,
};

/// Everything the application needs from a backend.
pub trait PortfolioApi:
    AboutRepository + SessionRepository + PrototypeRepository + CommentRepository + Clone + 'static
{
}

impl<T> PortfolioApi for T where
    T: AboutRepository + SessionRepository + PrototypeRepository + CommentRepository + Clone + 'static
{
}

/// Application root: owns the stores and the resolved viewer.
///
/// A reload (mount, logout) throws away every store and builds fresh ones,
/// so nothing fetched under the previous session survives it.
pub struct AppState<A = HttpApi>
where
    A: PortfolioApi,
{
    api: A,
    session: SessionResolver<A>,
    viewer: RwLock<Viewer>,
    about: RwLock<AboutView>,
    prototypes: RwLock<Arc<PrototypeStore<A>>>,
    comments: DashMap<i64, Arc<CommentStore<A>>>,
    focus: FocusEvents,
    focus_subscription: Mutex<Option<FocusSubscription>>,
}

impl AppState<HttpApi> {
    pub fn from_config(config: &settings::AppConfig) -> Result<Self, AppError> {
        let api = HttpApi::new(config)?;
        Ok(AppState::new(api, config.admin_email.clone()))
    }
}

impl<A> AppState<A>
where
    A: PortfolioApi,
{
    pub fn new(api: A, admin_email: impl Into<String>) -> Self {
        AppState {
            session: SessionResolver::new(api.clone(), admin_email),
            prototypes: RwLock::new(Arc::new(PrototypeStore::new(api.clone()))),
            api,
            viewer: RwLock::new(Viewer::Anonymous),
            about: RwLock::new(AboutView::Loading),
            comments: DashMap::new(),
            focus: FocusEvents::new(),
            focus_subscription: Mutex::new(None),
        }
    }

    /// First render: resolves the viewer and loads every collection.
    pub async fn mount(&self) {
        self.reload().await;
    }

    /// Full reload as after a page refresh.
    pub async fn reload(&self) {
        let viewer = self.session.resolve_viewer().await;
        info!(signed_in = viewer.is_signed_in(), admin = viewer.is_admin(), "viewer resolved");
        *self.viewer.write() = viewer;

        let store = Arc::new(PrototypeStore::new(self.api.clone()));
        // the old subscription is dropped (and aborted) here
        *self.focus_subscription.lock() = Some(store.watch_focus(&self.focus));
        *self.prototypes.write() = Arc::clone(&store);
        self.comments.clear();

        let about = AboutView::load(&self.api).await;
        *self.about.write() = about;

        store.load().await;
        self.load_comment_threads().await;
    }

    /// What a focus gain triggers, awaited in place: prototypes, then
    /// every comment thread.
    pub async fn refocus(&self) {
        self.prototypes().load().await;
        self.load_comment_threads().await;
    }

    /// Loads the thread of every prototype currently held, concurrently.
    pub async fn load_comment_threads(&self) {
        let threads: Vec<_> = self
            .prototypes()
            .prototypes()
            .iter()
            .filter_map(|p| p.id)
            .map(|id| self.comments_for(id))
            .collect();

        join_all(threads.iter().map(|thread| thread.load())).await;
    }

    /// Ends the session and reloads. On failure nothing is reloaded.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.logout().await?;
        self.reload().await;
        Ok(())
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer.read().clone()
    }

    pub fn login_url(&self) -> String {
        self.session.login_url()
    }

    pub fn focus(&self) -> &FocusEvents {
        &self.focus
    }

    pub fn prototypes(&self) -> Arc<PrototypeStore<A>> {
        self.prototypes.read().clone()
    }

    /// The comment store of `prototype_id`, created empty on first use.
    pub fn comments_for(&self, prototype_id: i64) -> Arc<CommentStore<A>> {
        let entry = self
            .comments
            .entry(prototype_id)
            .or_insert_with(|| Arc::new(CommentStore::new(self.api.clone(), prototype_id)));
        Arc::clone(entry.value())
    }

    /// `Loading` until the first mount has fetched `/about.json`.
    pub fn about(&self) -> AboutView {
        self.about.read().clone()
    }

    pub fn auth_control(&self) -> AuthControl {
        AuthControl::for_viewer(&self.viewer(), &self.login_url())
    }

    pub fn prototype_list(&self) -> PrototypeListView {
        PrototypeListView::build(&self.prototypes().snapshot(), &self.viewer())
    }

    pub fn comment_thread(&self, prototype_id: i64) -> CommentThreadView {
        CommentThreadView::build(
            &self.comments_for(prototype_id).snapshot(),
            &self.viewer(),
            &self.login_url(),
        )
    }
}
