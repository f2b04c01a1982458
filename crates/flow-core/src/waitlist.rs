//! Waitlist signup.
//!
//! Validation and normalization live here so the browser form and the server
//! handler agree on what an acceptable address is. Storage sits behind
//! [`WaitlistStore`]; inserts are idempotent so resubmitting is harmless.

use fnv::FnvHashSet;
use thiserror::Error;

pub const SUCCESS_MESSAGE: &str = "Thank you! You've been added to the waitlist.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const FAILURE_MESSAGE: &str = "Failed to join waitlist. Please try again.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaitlistError {
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, WaitlistError>;

pub trait WaitlistStore {
    /// Insert `email` if absent. An existing entry is not an error.
    fn upsert(&mut self, email: &str) -> Result<()>;
}

/// In-process store, used by tests and the native preview.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    emails: FnvHashSet<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(email)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Number of `upsert` calls seen, including duplicates.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl WaitlistStore for MemoryStore {
    fn upsert(&mut self, email: &str) -> Result<()> {
        self.writes += 1;
        self.emails.insert(email.to_owned());
        Ok(())
    }
}

/// Something non-blank, an `@`, something, a `.`, something. No whitespace
/// anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let bytes = email.as_bytes();
    let Some(at) = bytes.iter().skip(1).position(|&b| b == b'@').map(|i| i + 1) else {
        return false;
    };
    let Some(dot) = bytes[..bytes.len() - 1].iter().rposition(|&b| b == b'.') else {
        return false;
    };
    dot > at + 1
}

pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// Validate, normalize and store one address.
pub fn add_to_waitlist<S: WaitlistStore + ?Sized>(store: &mut S, email: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(WaitlistError::InvalidEmail);
    }
    store.upsert(&normalize_email(email))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_owned(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Form-facing wrapper: never fails, maps errors to user-facing text.
pub fn submit<S: WaitlistStore + ?Sized>(store: &mut S, email: &str) -> SubmitResponse {
    match add_to_waitlist(store, email) {
        Ok(()) => SubmitResponse::ok(),
        Err(WaitlistError::InvalidEmail) => SubmitResponse::failed(INVALID_EMAIL_MESSAGE),
        Err(e) => {
            log::error!("[waitlist] submission failed: {}", e);
            SubmitResponse::failed(FAILURE_MESSAGE)
        }
    }
}
