//! Admin gate and extractors.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use marginal_core::ports::{AuthError, PasswordService, SessionService};

use crate::config::AdminConfig;
use crate::middleware::error::AppError;
use crate::state::AppState;

/// Decides whether a request comes from the blog's admin.
///
/// The admin logs in with a password checked against an Argon2 hash and
/// receives a signed session token in the admin cookie.
pub struct AdminGate {
    sessions: Arc<dyn SessionService>,
    passwords: Arc<dyn PasswordService>,
    config: AdminConfig,
}

impl AdminGate {
    pub fn new(
        sessions: Arc<dyn SessionService>,
        passwords: Arc<dyn PasswordService>,
        config: AdminConfig,
    ) -> Self {
        Self {
            sessions,
            passwords,
            config,
        }
    }

    /// True when the request carries a valid admin session cookie.
    pub fn is_admin(&self, req: &HttpRequest) -> bool {
        self.check(req).is_ok()
    }

    fn check(&self, req: &HttpRequest) -> Result<(), AuthError> {
        let cookie = req
            .cookie(&self.config.cookie_name)
            .ok_or(AuthError::MissingSession)?;
        self.sessions.validate(cookie.value())
    }

    /// Check the admin password and build the session cookie.
    pub fn login(&self, password: &str) -> Result<Cookie<'static>, AuthError> {
        let hash = self
            .config
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify(password, hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.sessions.issue()?;
        Ok(Cookie::build(self.config.cookie_name.clone(), token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(self.sessions.ttl_seconds()))
            .finish())
    }
}

fn gate(req: &HttpRequest) -> Option<&AdminGate> {
    req.app_data::<web::Data<AppState>>()
        .map(|state| state.gate.as_ref())
}

/// Extractor for admin-only handlers; rejects with 401 otherwise.
///
/// ```ignore
/// async fn new_post(_admin: Admin) -> impl Responder { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Admin;

impl FromRequest for Admin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(gate) = gate(req) else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal(
                "Server configuration error".to_string(),
            )));
        };

        match gate.check(req) {
            Ok(()) => ready(Ok(Admin)),
            Err(e) => {
                tracing::debug!(error = %e, path = %req.path(), "Admin access denied");
                ready(Err(AppError::Unauthorized))
            }
        }
    }
}

/// Who is looking at a public page - never fails.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub admin: bool,
}

impl FromRequest for Viewer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let admin = gate(req).is_some_and(|gate| gate.is_admin(req));
        ready(Ok(Viewer { admin }))
    }
}
