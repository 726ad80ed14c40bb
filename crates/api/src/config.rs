// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_desk_domain::{DomainError, Tz, parse_timezone};

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// The store's timezone; "today" is the wall-clock date there.
    pub timezone: Tz,
}

impl EngineConfig {
    /// Builds a configuration from an IANA timezone name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known timezone.
    pub fn with_timezone(name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            timezone: parse_timezone(name)?,
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { timezone: Tz::UTC }
    }
}
