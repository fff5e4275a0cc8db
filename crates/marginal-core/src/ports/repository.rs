use async_trait::async_trait;

use crate::domain::Post;
use crate::error::RepoError;

/// Read-only view of the slugs already taken.
#[async_trait]
pub trait SlugLookup: Send + Sync {
    /// Count stored posts whose slug starts with `candidate`.
    async fn count_slug_matches(&self, candidate: &str) -> Result<u64, RepoError>;
}

/// Post repository. Listings are ordered newest first by creation time.
#[async_trait]
pub trait PostRepository: SlugLookup {
    /// Find a post by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// The `limit` most recently created posts.
    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Every post.
    async fn all(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts carrying `tag`.
    async fn tagged(&self, tag: &str) -> Result<Vec<Post>, RepoError>;

    /// Insert a new post.
    ///
    /// Fails with [`RepoError::Constraint`] when the slug is already taken;
    /// the check and the write happen as one step.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Overwrite the mutable fields (title, tags, body, updated time) of an
    /// existing post, matched by id.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;
}
