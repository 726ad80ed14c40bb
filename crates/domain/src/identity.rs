// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identifiers used by periods, submissions and entries.
//!
//! ## Invariants
//!
//! - An `IdentityToken` is always exactly 36 characters of hex digits and hyphens
//! - Values that do not match the shape (for example the legacy date-keyed
//!   ids such as `2025-6-second`) cannot be constructed
//! - Generated period tokens are name-based, so the same store, employee and
//!   start date always produce the same token

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// Length of the canonical identity-token shape.
pub const IDENTITY_TOKEN_LEN: usize = 36;

/// Namespace for name-based period identity tokens.
const PERIOD_NAMESPACE: Uuid = Uuid::from_u128(0x6b2f_41c8_9e0d_4a7b_b3f5_07c2_d9e8_a140);

/// Returns whether a raw identifier has the canonical identity-token shape.
#[must_use]
pub fn is_identity_token(value: &str) -> bool {
    value.len() == IDENTITY_TOKEN_LEN
        && value.bytes().all(|b| b.is_ascii_hexdigit() || b == b'-')
}

/// An opaque identifier in the canonical hex/hyphen shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityToken(String);

impl IdentityToken {
    /// Parses a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not have the identity-token shape.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if is_identity_token(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidIdentityToken(value.to_string()))
        }
    }

    /// Generates a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Derives the token of a locally generated period.
    #[must_use]
    pub fn for_period(store_id: &StoreId, employee_id: &EmployeeId, start_date: Date) -> Self {
        let name: String = format!(
            "{}/{}/{start_date}",
            store_id.value(),
            employee_id.value()
        );
        Self(
            Uuid::new_v5(&PERIOD_NAMESPACE, name.as_bytes())
                .hyphenated()
                .to_string(),
        )
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IdentityToken {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_identity_token(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidIdentityToken(value))
        }
    }
}

impl From<IdentityToken> for String {
    fn from(token: IdentityToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies the store a period belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(String);

impl StoreId {
    /// Creates a store identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidStoreId(String::from(
                "Store id cannot be empty",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies the employee a period or submission belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Creates an employee identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidEmployeeId(String::from(
                "Employee id cannot be empty",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
