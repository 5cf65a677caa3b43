use std::sync::Arc;

use reqwest::{cookie::Jar, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::{api_errors::ApiError, errors::AppError, settings::AppConfig};

/// reqwest-backed implementation of every repository trait.
///
/// The client keeps a cookie store so the backend session cookie set by the
/// OAuth flow (or seeded from config) rides along on every request.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    site_url: String,
    login_provider: String,
}

impl HttpApi {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let jar = Arc::new(Jar::default());

        if let Some(cookie) = &config.session_cookie {
            let origin = Url::parse(&config.base_url).map_err(ApiError::from)?;
            jar.add_cookie_str(cookie, &origin);
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::from)?;

        Ok(HttpApi {
            client,
            base_url: config.base_url.clone(),
            site_url: config.about_origin().to_string(),
            login_provider: config.login_provider.clone(),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login_provider(&self) -> &str {
        &self.login_provider
    }

    /// Absolute URL of a backend path. Any path prefix on the base URL is kept.
    pub fn api_url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    /// Absolute URL of a static asset on the site origin.
    pub fn site_url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}{}", self.site_url, path))?)
    }

    /// Sends `request` and decodes a JSON body from any 2xx response.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        failure: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, failure).await?;

        response.json::<T>().await.map_err(|e| {
            warn!("Malformed response body: {}", e);
            ApiError::Decode(e.to_string())
        })
    }

    /// Sends `request` and discards the body of a 2xx response.
    pub async fn execute(&self, request: RequestBuilder, failure: &str) -> Result<(), ApiError> {
        self.send(request, failure).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, failure: &str) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!("{} {}", failure, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "backend responded");

        if !status.is_success() {
            let err = ApiError::from_status(status, failure);
            if err.is_auth_failure() {
                debug!(status = status.as_u16(), "{}", failure);
            } else {
                warn!(status = status.as_u16(), "{}", failure);
            }
            return Err(err);
        }

        Ok(response)
    }
}
