//! Slug assignment.
//!
//! A title is normalized into a candidate (`Hello   World!!!` becomes
//! `hello-world`), then disambiguated against the slugs already stored by
//! appending `-n`, where `n` counts the existing posts whose slug starts
//! with the candidate.

use chrono::Utc;

use crate::domain::{Post, PostDraft};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, SlugLookup};

/// Upper bound on conditional inserts before giving up on a title.
pub const MAX_SLUG_ATTEMPTS: u64 = 16;

/// Normalize a title: lower-case, spaces to hyphens, drop everything that is
/// not `[a-z0-9-]`, collapse hyphen runs, trim hyphens from both ends.
pub fn normalize(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        let c = if c == ' ' { '-' } else { c };
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            continue;
        }
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug.trim_matches('-').to_owned()
}

/// The normalized title, or a timestamp token when nothing survives
/// normalization. Trimming comes first, so a title of only punctuation and
/// spaces (` - `) also gets the timestamp token.
fn candidate(title: &str) -> String {
    let slug = normalize(title);
    if slug.is_empty() {
        format!("post-{}", Utc::now().format("%Y%m%d%H%M%S"))
    } else {
        slug
    }
}

fn with_suffix(candidate: &str, n: u64) -> String {
    if n == 0 {
        candidate.to_owned()
    } else {
        format!("{candidate}-{n}")
    }
}

/// Derive a slug for `title` that does not collide with the slugs `lookup`
/// knows about at call time.
pub async fn generate_slug(title: &str, lookup: &dyn SlugLookup) -> Result<String, RepoError> {
    let candidate = candidate(title);
    let n = lookup.count_slug_matches(&candidate).await?;
    Ok(with_suffix(&candidate, n))
}

/// Create a post under a fresh unique slug.
///
/// The first suffix comes from counting existing matches. Each attempt is a
/// conditional insert; on a uniqueness conflict the next suffix is tried, so
/// two writers racing on the same title never end up sharing a slug.
pub async fn create_post(repo: &dyn PostRepository, draft: PostDraft) -> Result<Post, DomainError> {
    let candidate = candidate(&draft.title);
    let mut n = repo.count_slug_matches(&candidate).await?;

    for attempt in 1..=MAX_SLUG_ATTEMPTS {
        let post = Post::new(draft.clone(), with_suffix(&candidate, n));
        match repo.insert(post).await {
            Ok(saved) => {
                tracing::info!(slug = %saved.slug, attempt, "Post created");
                return Ok(saved);
            }
            Err(RepoError::Constraint(reason)) => {
                tracing::debug!(candidate = %candidate, n, %reason, "Slug taken, trying next suffix");
                n += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(DomainError::Duplicate(format!(
        "no free slug for '{candidate}' after {MAX_SLUG_ATTEMPTS} attempts"
    )))
}
