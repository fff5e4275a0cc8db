//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod render;
mod repository;

pub use auth::{AuthError, PasswordService, SessionService};
pub use render::{Highlighter, MarkupConverter, RenderError};
pub use repository::{PostRepository, SlugLookup};
