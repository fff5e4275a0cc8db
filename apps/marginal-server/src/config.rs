//! Application configuration loaded from environment variables.
//!
//! Built once in `main` and handed to [`crate::state::AppState`]; nothing
//! reads the environment after startup.

use std::env;

use serde::Serialize;

use marginal_infra::SessionConfig;
use marginal_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub site: SiteConfig,
    pub admin: AdminConfig,
    pub session: SessionConfig,
    /// Bundled syntect theme used for `/site.css`.
    pub highlight_theme: String,
}

/// Public facts about the blog, exposed to templates as `site`.
#[derive(Debug, Clone, Serialize)]
pub struct SiteConfig {
    pub name: String,
    pub author: String,
    /// Base URL the blog is deployed at, used for feed ids and links.
    pub url: String,
    /// Disqus shortname; comments are hidden when unset.
    pub disqus: Option<String>,
    pub feed_enabled: bool,
    pub feed_limit: u64,
    pub home_limit: u64,
}

/// Admin login settings.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub cookie_name: String,
    /// Argon2 PHC hash of the admin password. Login is impossible without it.
    pub password_hash: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "My Marginal Blog".to_string(),
            author: "My Name".to_string(),
            url: "http://localhost:8080".to_string(),
            disqus: None,
            feed_enabled: true,
            feed_limit: 20,
            home_limit: 5,
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 10),
            min_connections: parsed("DB_MIN_CONNECTIONS", 1),
        });

        let defaults = SiteConfig::default();
        let site = SiteConfig {
            name: env::var("SITE_NAME").unwrap_or(defaults.name),
            author: env::var("SITE_AUTHOR").unwrap_or(defaults.author),
            url: env::var("SITE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.url),
            disqus: env::var("DISQUS_SHORTNAME").ok().filter(|s| !s.is_empty()),
            feed_enabled: env::var("FEED_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.feed_enabled),
            feed_limit: parsed("FEED_LIMIT", defaults.feed_limit),
            home_limit: parsed("HOME_LIMIT", defaults.home_limit),
        };

        let password_hash = env::var("ADMIN_PASSWORD_HASH").ok().filter(|s| !s.is_empty());
        if password_hash.is_none() {
            tracing::warn!("ADMIN_PASSWORD_HASH not set. Admin login is disabled.");
        }

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            database,
            site,
            admin: AdminConfig {
                cookie_name: env::var("ADMIN_COOKIE").unwrap_or_else(|_| "admin".to_string()),
                password_hash,
            },
            session: SessionConfig::from_env(),
            highlight_theme: env::var("HIGHLIGHT_THEME")
                .unwrap_or_else(|_| "base16-ocean.dark".to_string()),
        }
    }
}
