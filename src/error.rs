use thiserror::Error;

/// Why an authentication attempt failed. Kept distinct internally for
/// diagnostics; the CLI reports a single uniform message for both cases
/// so login errors never reveal whether an email is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    UnknownEmail,
    WrongPassword,
}

#[derive(Error, Debug)]
pub enum PledgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least 6 characters")]
    WeakPassword,

    #[error("An account already exists for {0}")]
    DuplicateEmail(String),

    #[error("Invalid email or password")]
    Auth(AuthFailure),

    #[error("Storage error: {0}")]
    Storage(String),

    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PledgerError>;
