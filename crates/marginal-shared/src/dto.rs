//! Form payloads submitted by the admin pages.

use serde::Deserialize;

/// Body of `POST /create` and `POST /posts/{slug}`.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    /// Space separated.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub body: String,
}

/// Body of `POST /auth`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub pass: String,
}
