//! Admin login and post editing.

use actix_web::{HttpResponse, web};
use minijinja::context;

use marginal_core::domain::PostDraft;
use marginal_core::slug::create_post;
use marginal_shared::dto::{LoginForm, PostForm};

use super::{find_post, html, see_other};
use crate::middleware::auth::{Admin, Viewer};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::FormView;

fn draft(form: PostForm) -> AppResult<PostDraft> {
    Ok(PostDraft::parse(&form.title, &form.tags, form.body)?)
}

/// GET /auth
pub async fn login_form(state: web::Data<AppState>, viewer: Viewer) -> AppResult<HttpResponse> {
    let page = state
        .views
        .page("auth.html", viewer.admin, context! { title => "Login" })?;
    Ok(html(page))
}

/// POST /auth - sets the admin cookie on a correct password. Always
/// redirects home.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let mut response = see_other("/");

    match state.gate.login(&body.pass) {
        Ok(cookie) => {
            tracing::info!("Admin logged in");
            response
                .add_cookie(&cookie)
                .map_err(|e| AppError::Internal(e.to_string()))?;
        }
        Err(e) => tracing::warn!(error = %e, "Admin login failed"),
    }

    Ok(response)
}

/// GET /new
pub async fn new_form(_admin: Admin, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let page = state.views.page(
        "edit.html",
        true,
        context! { title => "New Post", form => FormView::default() },
    )?;
    Ok(html(page))
}

/// POST /create
pub async fn create(
    _admin: Admin,
    state: web::Data<AppState>,
    body: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let draft = draft(body.into_inner())?;
    let post = create_post(state.posts.as_ref(), draft).await?;
    Ok(see_other(&format!("/posts/{}", post.slug)))
}

/// GET /posts/{slug}/edit
pub async fn edit_form(
    _admin: Admin,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, &path).await?;

    let page = state.views.page(
        "edit.html",
        true,
        context! { title => "Edit", slug => &post.slug, form => FormView::from(&post) },
    )?;
    Ok(html(page))
}

/// POST /posts/{slug} - the slug never changes, even when the title does.
pub async fn update(
    _admin: Admin,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let mut post = find_post(&state, &path).await?;

    post.apply(draft(body.into_inner())?);
    let post = state.posts.update(post).await?;
    tracing::info!(slug = %post.slug, "Post updated");

    Ok(see_other(&format!("/posts/{}", post.slug)))
}
