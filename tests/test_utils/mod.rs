#![allow(dead_code)]

use std::{collections::HashMap, net::TcpListener, sync::Arc, time::Duration};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use parking_lot::Mutex;
use showcase_client::{
    entities::{
        comment::{Comment, CommentContent},
        prototype::Prototype,
        user::User,
    },
    settings::AppConfig,
    AppState,
};

use crate::test_data::*;

// ───── Mock Backend ─────────────────────────────────────────────────

#[derive(Default)]
struct BackendData {
    prototypes: Vec<Prototype>,
    /// (prototype id, comment)
    comments: Vec<(i64, Comment)>,
    next_id: i64,
    revoked: Vec<String>,
    hits: Vec<String>,
    failures: HashMap<String, u16>,
}

/// In-memory stand-in for the portfolio backend.
pub struct MockBackend {
    data: Mutex<BackendData>,
}

impl MockBackend {
    fn seeded() -> Self {
        let comments = mock_comments().into_iter().map(|c| (1, c)).collect();
        MockBackend {
            data: Mutex::new(BackendData {
                prototypes: mock_prototypes(),
                comments,
                next_id: 1000,
                ..Default::default()
            }),
        }
    }

    /// Makes `route` (e.g. `"POST /api/prototypes"`) answer with `status`.
    pub fn fail(&self, route: &str, status: u16) {
        self.data.lock().failures.insert(route.to_string(), status);
    }

    pub fn hits(&self, route: &str) -> usize {
        self.data.lock().hits.iter().filter(|h| h.as_str() == route).count()
    }

    pub fn prototypes(&self) -> Vec<Prototype> {
        self.data.lock().prototypes.clone()
    }

    pub fn comments_of(&self, prototype_id: i64) -> Vec<Comment> {
        self.data
            .lock()
            .comments
            .iter()
            .filter(|(pid, _)| *pid == prototype_id)
            .map(|(_, c)| c.clone())
            .collect()
    }

    /// Records the request and returns the injected failure, if any.
    fn guard(&self, req: &HttpRequest) -> Option<HttpResponse> {
        let route = format!("{} {}", req.method(), req.path());
        let mut data = self.data.lock();
        data.hits.push(route.clone());

        data.failures.get(&route).map(|status| {
            let status = actix_web::http::StatusCode::from_u16(*status)
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).finish()
        })
    }

    fn viewer(&self, req: &HttpRequest) -> Option<User> {
        let token = req.cookie("SESSION")?.value().to_string();
        if self.data.lock().revoked.contains(&token) {
            return None;
        }
        user_for_token(&token)
    }

    fn is_admin(&self, req: &HttpRequest) -> bool {
        self.viewer(req).is_some_and(|u| u.email == ADMIN_EMAIL)
    }
}

type Backend = web::Data<MockBackend>;

async fn current_user(req: HttpRequest, backend: Backend) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    match backend.viewer(&req) {
        Some(user) => HttpResponse::Ok().json(user),
        None => HttpResponse::Unauthorized().finish(),
    }
}

async fn logout(req: HttpRequest, backend: Backend) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    if let Some(cookie) = req.cookie("SESSION") {
        backend.data.lock().revoked.push(cookie.value().to_string());
    }
    HttpResponse::Ok().finish()
}

async fn list_prototypes(req: HttpRequest, backend: Backend) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    HttpResponse::Ok().json(backend.prototypes())
}

async fn create_prototype(req: HttpRequest, backend: Backend, body: web::Json<Prototype>) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    if !backend.is_admin(&req) {
        return HttpResponse::Forbidden().finish();
    }

    let mut data = backend.data.lock();
    let mut prototype = body.into_inner();
    data.next_id += 1;
    prototype.id = Some(data.next_id);
    data.prototypes.push(prototype.clone());

    HttpResponse::Created().json(prototype)
}

async fn update_prototype(
    req: HttpRequest,
    backend: Backend,
    path: web::Path<i64>,
    body: web::Json<Prototype>,
) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    if !backend.is_admin(&req) {
        return HttpResponse::Forbidden().finish();
    }

    let id = path.into_inner();
    let mut data = backend.data.lock();
    match data.prototypes.iter_mut().find(|p| p.id == Some(id)) {
        Some(existing) => {
            *existing = Prototype { id: Some(id), ..body.into_inner() };
            HttpResponse::Ok().json(existing.clone())
        }
        None => HttpResponse::NotFound().finish(),
    }
}

async fn delete_prototype(req: HttpRequest, backend: Backend, path: web::Path<i64>) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    if !backend.is_admin(&req) {
        return HttpResponse::Forbidden().finish();
    }

    let id = path.into_inner();
    let mut data = backend.data.lock();
    data.prototypes.retain(|p| p.id != Some(id));
    data.comments.retain(|(pid, _)| *pid != id);
    HttpResponse::NoContent().finish()
}

async fn list_comments(req: HttpRequest, backend: Backend, path: web::Path<i64>) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    HttpResponse::Ok().json(backend.comments_of(path.into_inner()))
}

async fn create_comment(
    req: HttpRequest,
    backend: Backend,
    path: web::Path<i64>,
    body: web::Json<CommentContent>,
) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    let Some(author) = backend.viewer(&req) else {
        return HttpResponse::Unauthorized().finish();
    };

    let mut data = backend.data.lock();
    data.next_id += 1;
    let comment = Comment {
        id: data.next_id,
        content: body.into_inner().content,
        author_name: author.name,
        author_avatar_url: author.picture,
        user_id: author.sub,
        created_at: "2024-06-01T09:00:00Z".into(),
    };
    data.comments.push((path.into_inner(), comment));

    HttpResponse::Created().finish()
}

async fn update_comment(
    req: HttpRequest,
    backend: Backend,
    path: web::Path<i64>,
    body: web::Json<CommentContent>,
) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    let Some(viewer) = backend.viewer(&req) else {
        return HttpResponse::Unauthorized().finish();
    };
    let is_admin = viewer.email == ADMIN_EMAIL;

    let id = path.into_inner();
    let mut data = backend.data.lock();
    match data.comments.iter_mut().find(|(_, c)| c.id == id) {
        Some((_, comment)) if is_admin || comment.user_id == viewer.sub => {
            comment.content = body.into_inner().content;
            HttpResponse::Ok().json(comment.clone())
        }
        Some(_) => HttpResponse::Forbidden().finish(),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn delete_comment(req: HttpRequest, backend: Backend, path: web::Path<i64>) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    let Some(viewer) = backend.viewer(&req) else {
        return HttpResponse::Unauthorized().finish();
    };
    let is_admin = viewer.email == ADMIN_EMAIL;

    let id = path.into_inner();
    let mut data = backend.data.lock();
    let allowed = data
        .comments
        .iter()
        .any(|(_, c)| c.id == id && (is_admin || c.user_id == viewer.sub));
    if !allowed {
        return HttpResponse::Forbidden().finish();
    }
    data.comments.retain(|(_, c)| c.id != id);
    HttpResponse::NoContent().finish()
}

async fn about(req: HttpRequest, backend: Backend) -> HttpResponse {
    if let Some(failure) = backend.guard(&req) {
        return failure;
    }
    HttpResponse::Ok().json(mock_about())
}

fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/about.json", web::get().to(about))
        .route("/api/user", web::get().to(current_user))
        .route("/api/logout", web::post().to(logout))
        .service(
            web::resource("/api/prototypes")
                .route(web::get().to(list_prototypes))
                .route(web::post().to(create_prototype)),
        )
        .service(
            web::resource("/api/prototypes/{id}")
                .route(web::put().to(update_prototype))
                .route(web::delete().to(delete_prototype)),
        )
        .service(
            web::resource("/api/prototypes/{id}/comments")
                .route(web::get().to(list_comments))
                .route(web::post().to(create_comment)),
        )
        .service(
            web::resource("/api/comments/{id}")
                .route(web::put().to(update_comment))
                .route(web::delete().to(delete_comment)),
        );
}

// ───── Test App ─────────────────────────────────────────────────────

pub struct TestApp {
    pub address: String,
    pub backend: Arc<MockBackend>,
    pub config: AppConfig,
    pub state: AppState,
}

impl TestApp {
    /// Starts a mock backend and an app whose cookie store carries `session`
    /// (e.g. [`ADMIN_SESSION`]); `None` browses anonymously.
    pub async fn spawn(session: Option<&str>) -> Self {
        let backend = Arc::new(MockBackend::seeded());

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let data = web::Data::from(backend.clone());
        let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(configure_routes))
            .listen(listener)
            .expect("Failed to bind mock backend")
            .workers(1)
            .run();

        tokio::spawn(server);

        let client = reqwest::Client::new();
        while client.get(format!("{}/about.json", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let config = test_config(&address, session);
        let state = AppState::from_config(&config).expect("Failed to build app state");

        TestApp {
            address,
            backend,
            config,
            state,
        }
    }

    /// Spawns and mounts in one go.
    pub async fn mounted(session: Option<&str>) -> Self {
        let app = Self::spawn(session).await;
        app.state.mount().await;
        app
    }

    pub fn login_url(&self) -> String {
        format!("{}/oauth2/authorization/google", self.address)
    }
}

fn test_config(address: &str, session: Option<&str>) -> AppConfig {
    let mut vars: HashMap<String, String> = [
        ("APP_ENV", "testing"),
        ("APP_BASE_URL", address),
        ("APP_ADMIN_EMAIL", ADMIN_EMAIL),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    if let Some(session) = session {
        vars.insert("APP_SESSION_COOKIE".into(), session.into());
    }

    AppConfig::from_source(Some(vars.into_iter().collect())).expect("Invalid test config")
}
