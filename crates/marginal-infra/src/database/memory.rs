//! In-memory post store - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use marginal_core::domain::Post;
use marginal_core::error::RepoError;
use marginal_core::ports::{PostRepository, SlugLookup};

/// In-memory post store keyed by slug, behind an async RwLock.
///
/// Inserts check and write under one write lock, so slug uniqueness holds
/// across concurrent writers.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<String, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    async fn collect<F>(&self, keep: F) -> Vec<Post>
    where
        F: Fn(&Post) -> bool,
    {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().filter(|p| keep(p)).cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SlugLookup for InMemoryPostRepository {
    async fn count_slug_matches(&self, candidate: &str) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.keys().filter(|slug| slug.starts_with(candidate)).count() as u64)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(slug).cloned())
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.collect(|_| true).await;
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(|_| true).await)
    }

    async fn tagged(&self, tag: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(|p| p.tags.iter().any(|t| t == tag)).await)
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&post.slug) {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                post.slug
            )));
        }
        store.insert(post.slug.clone(), post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let existing = store
            .values_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;

        existing.title = post.title;
        existing.tags = post.tags;
        existing.body = post.body;
        existing.updated_at = post.updated_at;
        Ok(existing.clone())
    }
}
