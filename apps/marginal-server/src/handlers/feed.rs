//! Atom feed endpoint.

use actix_web::{HttpResponse, web};

use crate::feed::build_feed;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /feed - the most recent posts as Atom.
pub async fn atom(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    if !state.site.feed_enabled {
        return Err(AppError::NotFound("Feed is disabled".to_string()));
    }

    let posts = state.posts.recent(state.site.feed_limit).await?;
    let feed = build_feed(&state.site, &posts, &state.renderer)?;

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(feed.to_string()))
}
