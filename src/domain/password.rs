//! Stored login credential: an Argon2id PHC string, checked on login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// A user's credential as kept in `users.password_hash`.
///
/// The plain text is hashed on construction and never retained.
pub struct Password {
    hash: String,
}

// Hashes stay out of logs
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a password submitted at registration.
    ///
    /// # Errors
    /// `MissingField` for an empty password.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.is_empty() {
            return Err(AppError::missing_field("Password is required"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap the hash column of a loaded user.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// The PHC string to write to the users row.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check a login attempt. A stored value that is not a PHC string
    /// never matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is not a PHC string: {}", e);
                false
            }
        }
    }
}
