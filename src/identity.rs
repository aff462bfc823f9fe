// ABOUTME: Identity boundary — who the current user is, and the closed set of auth failure kinds.
// ABOUTME: Identity failures are a closed AuthError enum carrying the user-facing message.

use thiserror::Error;

/// The signed-in user as far as the chat surface cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    email: String,
}

impl UserIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Name used in the header and the canned greeting. The email itself.
    pub fn greeting_name(&self) -> &str {
        &self.email
    }

    /// Upper-cased first character, shown as the header avatar.
    pub fn initial(&self) -> String {
        self.email
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Why no user could be resolved, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No identity configured at all.
    #[error("You are signed out. Please log in.")]
    SignedOut,
    /// An identity was configured but left blank.
    #[error("Email is required.")]
    MissingCredentials,
    #[error("Invalid email format.")]
    InvalidEmail,
}

/// Supplies the current user's identity.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Result<UserIdentity, AuthError>;
}

/// Identity taken from local configuration rather than a remote provider.
#[derive(Debug, Clone, Default)]
pub struct LocalIdentity {
    email: Option<String>,
}

impl LocalIdentity {
    pub fn new(email: Option<String>) -> Self {
        Self { email }
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_user(&self) -> Result<UserIdentity, AuthError> {
        let email = self.email.as_deref().ok_or(AuthError::SignedOut)?.trim();
        if email.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }
        Ok(UserIdentity::new(email))
    }
}
