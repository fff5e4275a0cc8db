//! # Marginal Core
//!
//! The domain layer of the Marginal blog.
//! This crate holds the post model, slug assignment and the content rendering
//! pipeline. Storage, highlighting and markup engines are reached through the
//! traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod render;
pub mod slug;

pub use error::DomainError;
pub use render::ContentRenderer;
