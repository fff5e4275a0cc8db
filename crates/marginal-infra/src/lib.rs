//! # Marginal Infrastructure
//!
//! Concrete implementations of the ports defined in `marginal-core`:
//! post storage, admin authentication, syntax highlighting and Markdown.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory post store only
//! - `postgres` - PostgreSQL post store via SeaORM

pub mod auth;
pub mod database;
pub mod render;

pub use auth::{Argon2PasswordService, JwtSessionService, SessionConfig};
pub use database::InMemoryPostRepository;
pub use render::{PulldownMarkup, SyntectHighlighter};

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
