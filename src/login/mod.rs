//! Login Module
//!
//! Credential entry modal: record, field layout, surface contract and the
//! session lifecycle.

pub mod field;
pub mod modal;
pub mod record;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

use field::FieldId;

/// Login errors
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("A login session is already open")]
    SessionActive,

    #[error("Missing {} field(s)", .0.len())]
    Incomplete(Vec<FieldId>),
}

pub type LoginResult<T> = Result<T, LoginError>;

// Re-exports
pub use modal::LoginModal;
pub use record::CredentialRecord;
