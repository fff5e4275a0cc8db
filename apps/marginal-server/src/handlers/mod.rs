//! HTTP handlers and route configuration.

mod admin;
mod assets;
mod feed;
mod health;
mod posts;

use actix_web::{HttpResponse, http::header, web};

use marginal_core::DomainError;
use marginal_core::domain::Post;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        // Public routes
        .route("/site.css", web::get().to(assets::stylesheet))
        .route("/health", web::get().to(health::health_check))
        .route("/", web::get().to(posts::index))
        .route("/feed", web::get().to(feed::atom))
        .route("/tag/{tag}", web::get().to(posts::tagged))
        .route("/posts", web::get().to(posts::archive))
        // Admin routes
        .route("/auth", web::get().to(admin::login_form))
        .route("/auth", web::post().to(admin::login))
        .route("/new", web::get().to(admin::new_form))
        .route("/create", web::post().to(admin::create))
        .route("/posts/{slug}/edit", web::get().to(admin::edit_form))
        .route("/posts/{slug}", web::get().to(posts::show))
        .route("/posts/{slug}", web::post().to(admin::update));
}

/// Malformed admin forms get the same problem JSON as every other error.
fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

async fn find_post(state: &AppState, slug: &str) -> AppResult<Post> {
    state
        .posts
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound {
                entity_type: "Post",
                slug: slug.to_owned(),
            }
            .into()
        })
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
