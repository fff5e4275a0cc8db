//! Admin authentication implementations.

mod password;
mod session;

pub use password::Argon2PasswordService;
pub use session::{JwtSessionService, SessionConfig};
