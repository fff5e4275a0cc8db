//! Public post pages.

use actix_web::{HttpResponse, web};
use minijinja::context;

use marginal_core::domain::Post;

use super::{find_post, html};
use crate::middleware::auth::Viewer;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::PostView;

/// Render a listing page with each post cut to its summary.
fn listing(
    state: &AppState,
    viewer: Viewer,
    posts: &[Post],
    tag: Option<&str>,
) -> AppResult<HttpResponse> {
    let views = posts
        .iter()
        .map(|post| -> AppResult<PostView<'_>> {
            Ok(PostView::new(post, state.renderer.render(&post.body, true)?))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let page = state
        .views
        .page("posts.html", viewer.admin, context! { posts => views, tag })?;
    Ok(html(page))
}

/// GET / - the most recent posts.
pub async fn index(state: web::Data<AppState>, viewer: Viewer) -> AppResult<HttpResponse> {
    let posts = state.posts.recent(state.site.home_limit).await?;
    listing(&state, viewer, &posts, None)
}

/// GET /posts - every post, newest first.
pub async fn archive(state: web::Data<AppState>, viewer: Viewer) -> AppResult<HttpResponse> {
    let posts = state.posts.all().await?;
    listing(&state, viewer, &posts, None)
}

/// GET /tag/{tag}
pub async fn tagged(
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let tag = path.into_inner();
    let posts = state.posts.tagged(&tag).await?;
    listing(&state, viewer, &posts, Some(&tag))
}

/// GET /posts/{slug}
pub async fn show(
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, &path).await?;

    let body = state.renderer.render(&post.body, false)?;
    let page = state.views.page(
        "post.html",
        viewer.admin,
        context! { title => &post.title, post => PostView::new(&post, body) },
    )?;
    Ok(html(page))
}
