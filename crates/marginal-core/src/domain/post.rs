use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - a single blog entry keyed by its slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    /// Assigned once at creation and never regenerated.
    pub slug: String,
    pub tags: Vec<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The author-editable part of a post, as submitted by the admin form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    pub title: String,
    pub tags: Vec<String>,
    pub body: String,
}

impl PostDraft {
    /// Build a draft from raw form fields. The title is trimmed and must not
    /// be empty; tags are whitespace separated.
    pub fn parse(title: &str, tags: &str, body: String) -> Result<Self, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }

        Ok(Self {
            title: title.to_owned(),
            tags: parse_tags(tags),
            body,
        })
    }
}

impl Post {
    /// Create a new post from a draft under an already chosen slug.
    pub fn new(draft: PostDraft, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            slug,
            tags: draft.tags,
            body: draft.body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit. The slug and creation time stay untouched.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.tags = draft.tags;
        self.body = draft.body;
        self.updated_at = Utc::now();
    }

    /// Absolute URL of the post under `site_url`.
    pub fn url(&self, site_url: &str) -> String {
        format!("{}/posts/{}", site_url.trim_end_matches('/'), self.slug)
    }
}

/// Split a space separated tag field, dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_owned).collect()
}
