pub mod health;
pub use self::health::health;

pub mod session;
pub use self::session::session;

pub mod sign_in;
pub use self::sign_in::sign_in;

pub mod sign_out;
pub use self::sign_out::sign_out;

pub mod sign_up;
pub use self::sign_up::sign_up;

// common functions for the form handlers
use regex::Regex;
use std::collections::BTreeMap;

/// Minimum accepted password length for sign-in and sign-up.
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// Field-level validation errors, keyed by form field name. Serialized as-is
/// into the 400 response so the form can re-render with per-field messages.
#[derive(Debug, Default)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<&'static str, Vec<String>> {
        self.0
    }
}

// axum handler for the application root, the post-login landing target
pub async fn root() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
