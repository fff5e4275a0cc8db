//! Argon2 check of the admin password against `ADMIN_PASSWORD_HASH`.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use marginal_core::ports::{AuthError, PasswordService};

/// Hashes are PHC strings (`$argon2id$v=19$...`), the format the
/// `hash-password` command prints and `ADMIN_PASSWORD_HASH` expects.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// `Ok(false)` only for a wrong password. A configured hash that argon2
    /// cannot check (bad PHC string, unsupported params) is an error, so a
    /// broken deployment does not look like a typo at the login form.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let stored = PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_password_round_trip() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify("correct horse", &hash).unwrap());
        assert!(!service.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let service = Argon2PasswordService::new();

        let first = service.hash("same").unwrap();
        let second = service.hash("same").unwrap();

        assert_ne!(first, second);
        assert!(service.verify("same", &first).unwrap());
        assert!(service.verify("same", &second).unwrap());
    }

    #[test]
    fn test_plaintext_in_hash_setting_is_an_error() {
        let service = Argon2PasswordService::new();
        let result = service.verify("anything", "plaintext-password");
        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }

    #[test]
    fn test_hash_with_unknown_algorithm_is_an_error() {
        let service = Argon2PasswordService::new();
        let result = service.verify(
            "anything",
            "$scrypt$ln=16,r=8,p=1$aM15713r3Xsvxbi31lqr1Q$nFNh2CVHVjNldFVKDHDlm4CbdRSCdEBsjjJxD+iCs5E",
        );
        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }
}
