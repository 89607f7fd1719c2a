//! Credential Record
//!
//! The value handed to the caller when a login session completes.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::field::FieldId;
use super::{LoginError, LoginResult};

/// Username, API key and secret collected by one login session.
///
/// Values are never absent; an empty string means the field was left unset.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CredentialRecord {
    pub username: String,
    pub api_key: String,
    pub secret: String,
}

impl CredentialRecord {
    #[cfg(test)]
    pub fn new(
        username: impl Into<String>,
        api_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            secret: secret.into(),
        }
    }

    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Username => &self.username,
            FieldId::ApiKey => &self.api_key,
            FieldId::Secret => &self.secret,
        }
    }

    /// Replace a value, wiping the previous one.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = match field {
            FieldId::Username => &mut self.username,
            FieldId::ApiKey => &mut self.api_key,
            FieldId::Secret => &mut self.secret,
        };
        slot.zeroize();
        *slot = value.into();
    }

    pub fn missing_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    pub fn check(&self) -> LoginResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoginError::Incomplete(missing))
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("api_key", &redacted(&self.api_key))
            .field("secret", &redacted(&self.secret))
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() { "" } else { "<redacted>" }
}

/// True iff every field of the record is non-empty.
pub fn validate(record: &CredentialRecord) -> bool {
    record.check().is_ok()
}
