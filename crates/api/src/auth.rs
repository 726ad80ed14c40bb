// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resolution of the current employee.
//!
//! The engine never authenticates anyone. It asks an `IdentityProvider`
//! which employee is acting, and trusts the backend to have checked the
//! credential already.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;
use shift_desk_domain::EmployeeId;

use crate::error::AuthError;

/// The claim carrying the employee id.
pub const EMPLOYEE_CLAIM: &str = "employeeId";

/// Supplies the employee on whose behalf the engine acts.
pub trait IdentityProvider: Send + Sync {
    /// Returns the current employee.
    ///
    /// # Errors
    ///
    /// Returns an error if no employee can be determined.
    fn current_employee(&self) -> Result<EmployeeId, AuthError>;
}

/// A fixed identity, or none at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    employee_id: Option<EmployeeId>,
}

impl StaticIdentity {
    /// Always resolves to `employee_id`.
    #[must_use]
    pub const fn new(employee_id: EmployeeId) -> Self {
        Self {
            employee_id: Some(employee_id),
        }
    }

    /// Never resolves.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { employee_id: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_employee(&self) -> Result<EmployeeId, AuthError> {
        self.employee_id.clone().ok_or(AuthError::MissingCredential)
    }
}

/// Reads the employee claim from a bearer JWT **without verifying it**.
///
/// Only the payload segment is base64url-decoded; the signature is
/// ignored. This is not an authorization check and must not be used as one.
#[derive(Clone)]
pub struct UnverifiedTokenClaims {
    token: Option<String>,
}

impl std::fmt::Debug for UnverifiedTokenClaims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnverifiedTokenClaims")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl UnverifiedTokenClaims {
    /// Wraps the bearer token, if any.
    #[must_use]
    pub const fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Decodes the payload segment of `token` into JSON claims.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not three dot-separated segments or
    /// the payload is not base64url-encoded JSON.
    pub fn decode_claims(token: &str) -> Result<Value, AuthError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [_, payload, _] = segments.as_slice() else {
            return Err(AuthError::MalformedToken {
                reason: format!("expected 3 segments, found {}", segments.len()),
            });
        };

        let bytes: Vec<u8> = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AuthError::MalformedToken {
                reason: e.to_string(),
            })?;

        serde_json::from_slice(&bytes).map_err(|e| AuthError::MalformedToken {
            reason: e.to_string(),
        })
    }
}

impl IdentityProvider for UnverifiedTokenClaims {
    fn current_employee(&self) -> Result<EmployeeId, AuthError> {
        let token: &str = self.token.as_deref().ok_or(AuthError::MissingCredential)?;
        let claims: Value = Self::decode_claims(token)?;

        let raw: String = match claims.get(EMPLOYEE_CLAIM) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => {
                return Err(AuthError::MissingClaim {
                    claim: EMPLOYEE_CLAIM.to_string(),
                });
            }
        };

        Ok(EmployeeId::new(&raw)?)
    }
}
