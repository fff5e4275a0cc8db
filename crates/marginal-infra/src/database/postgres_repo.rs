//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, SqlErr,
};

use marginal_core::domain::Post;
use marginal_core::error::RepoError;
use marginal_core::ports::{PostRepository, SlugLookup};

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository. Slug uniqueness is enforced by the unique
/// index on `posts.slug`.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn newest_first() -> Select<PostEntity> {
        PostEntity::find().order_by_desc(post::Column::CreatedAt)
    }

    async fn fetch(&self, select: Select<PostEntity>) -> Result<Vec<Post>, RepoError> {
        let result = select
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

fn write_error(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::Constraint(detail);
    }
    let err_str = err.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint(err_str)
    } else {
        RepoError::Query(err_str)
    }
}

#[async_trait]
impl SlugLookup for PostgresPostRepository {
    async fn count_slug_matches(&self, candidate: &str) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::Slug.starts_with(candidate))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(%slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        self.fetch(Self::newest_first().limit(limit)).await
    }

    async fn all(&self) -> Result<Vec<Post>, RepoError> {
        self.fetch(Self::newest_first()).await
    }

    async fn tagged(&self, tag: &str) -> Result<Vec<Post>, RepoError> {
        let has_tag = Expr::cust_with_values("? = ANY(\"posts\".\"tags\")", [tag.to_owned()]);
        self.fetch(Self::newest_first().filter(has_tag)).await
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = post.into();
        let model = active_model.insert(&self.db).await.map_err(write_error)?;

        Ok(model.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let active_model = post::ActiveModel {
            id: Set(post.id),
            title: Set(post.title),
            tags: Set(post.tags),
            body: Set(post.body),
            updated_at: Set(post.updated_at.into()),
            ..Default::default()
        };

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => RepoError::NotFound,
            e => write_error(e),
        })?;

        Ok(model.into())
    }
}
