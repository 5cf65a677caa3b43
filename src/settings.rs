use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};
use url::Url;
use validator::ValidateEmail;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    /// Backend origin, e.g. `https://api.example.com`. All `/api/*` calls and
    /// the OAuth entry point hang off it.
    #[serde(default)]
    pub base_url: String,

    /// Where the static `about.json` is served; the backend origin if unset.
    #[serde(default)]
    pub site_url: Option<String>,

    #[serde(default)]
    pub admin_email: String,

    #[serde(default = "default_login_provider")]
    pub login_provider: String,

    /// `name=value` cookie seeded into the client's cookie store.
    #[serde(default)]
    pub session_cookie: Option<String>,

    #[serde(default)]
    pub log_format: Option<LogFormat>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_login_provider() -> String {
    "google".to_string()
}

impl AppConfig {
    /// Reads `APP_*` values from the process environment (and `.env`).
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_source(None)
    }

    /// Builds the config from an explicit set of `APP_*` variables instead
    /// of the process environment when `vars` is `Some`.
    pub fn from_source(vars: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let raw_env = match &vars {
            Some(vars) => vars.get("APP_ENV").cloned(),
            None => env::var("APP_ENV").ok(),
        }
        .unwrap_or_else(|| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder().add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .ignore_empty(true)
                .source(vars),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;
        config.base_url = config.base_url.trim().trim_end_matches('/').to_string();
        config.site_url = config
            .site_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.base_url.is_empty() {
            errors.push("BASE_URL cannot be empty".to_string());
        } else if !is_http_origin(&self.base_url) {
            errors.push(format!("BASE_URL must be an absolute http(s) URL, got {}", self.base_url));
        }
        if let Some(site_url) = &self.site_url {
            if !is_http_origin(site_url) {
                errors.push(format!("SITE_URL must be an absolute http(s) URL, got {}", site_url));
            }
        }
        if !self.admin_email.validate_email() {
            errors.push("ADMIN_EMAIL must be a valid email address".to_string());
        }
        if self.login_provider.trim().is_empty() {
            errors.push("LOGIN_PROVIDER cannot be empty".to_string());
        }
        if let Some(cookie) = &self.session_cookie {
            if !cookie.contains('=') {
                errors.push("SESSION_COOKIE must look like name=value".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn about_origin(&self) -> &str {
        self.site_url.as_deref().unwrap_or(&self.base_url)
    }

    pub fn log_format(&self) -> LogFormat {
        match self.log_format {
            Some(format) => format,
            None if self.is_production() => LogFormat::Json,
            None => LogFormat::Pretty,
        }
    }
}

fn is_http_origin(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("base_url", &self.base_url)
            .field("site_url", &self.site_url)
            .field("admin_email", &self.admin_email)
            .field("login_provider", &self.login_provider)
            .field("session_cookie", &self.session_cookie.as_deref().map(str::redact))
            .field("log_format", &self.log_format())
            .finish()
    }
}
