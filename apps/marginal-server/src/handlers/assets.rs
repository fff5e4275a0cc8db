//! Static assets.

use actix_web::{HttpResponse, web};

use crate::state::AppState;

/// GET /site.css - site styles followed by the highlight theme.
pub async fn stylesheet(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(state.stylesheet.to_string())
}
