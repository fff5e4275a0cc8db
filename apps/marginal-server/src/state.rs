//! Application state - shared across all handlers.

use std::sync::Arc;

use marginal_core::ContentRenderer;
use marginal_core::ports::PostRepository;
use marginal_infra::{
    Argon2PasswordService, InMemoryPostRepository, JwtSessionService, PulldownMarkup,
    SyntectHighlighter,
};

#[cfg(feature = "postgres")]
use marginal_infra::PostgresPostRepository;
#[cfg(feature = "postgres")]
use marginal_infra::database::connect;

use crate::config::{AppConfig, SiteConfig};
use crate::middleware::auth::AdminGate;
use crate::views::Views;

/// Static part of `/site.css`; the highlight theme is appended at startup.
const SITE_CSS: &str = include_str!("../assets/site.css");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub renderer: ContentRenderer,
    pub views: Arc<Views>,
    pub site: Arc<SiteConfig>,
    pub stylesheet: Arc<str>,
    pub gate: Arc<AdminGate>,
}

impl AppState {
    /// Build the application state, choosing the post store from the config.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let posts = select_store(config).await;
        let state = Self::with_store(config, posts)?;
        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Build the application state around an existing post store.
    pub fn with_store(config: &AppConfig, posts: Arc<dyn PostRepository>) -> anyhow::Result<Self> {
        let highlighter = Arc::new(SyntectHighlighter::new());
        let theme_css = highlighter.stylesheet(&config.highlight_theme)?;
        let stylesheet: Arc<str> = format!("{SITE_CSS}\n{theme_css}").into();

        let renderer = ContentRenderer::new(highlighter, Arc::new(PulldownMarkup::new()));
        let views = Views::new(&config.site)?;

        let gate = AdminGate::new(
            Arc::new(JwtSessionService::new(config.session.clone())),
            Arc::new(Argon2PasswordService::new()),
            config.admin.clone(),
        );

        Ok(Self {
            posts,
            renderer,
            views: Arc::new(views),
            site: Arc::new(config.site.clone()),
            stylesheet,
            gate: Arc::new(gate),
        })
    }
}

#[cfg(feature = "postgres")]
async fn select_store(config: &AppConfig) -> Arc<dyn PostRepository> {
    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Arc::new(InMemoryPostRepository::new());
    };

    match connect(db_config).await {
        Ok(conn) => {
            tracing::info!("Using PostgreSQL post store");
            Arc::new(PostgresPostRepository::new(conn))
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            Arc::new(InMemoryPostRepository::new())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn select_store(config: &AppConfig) -> Arc<dyn PostRepository> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
    }
    tracing::info!("Running without postgres feature - using in-memory repository");
    Arc::new(InMemoryPostRepository::new())
}
