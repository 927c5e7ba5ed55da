// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workflow role identifiers.
//!
//! A role code is a short uppercase identifier for a workflow role
//! (e.g., `SHO`, `DCP`, `ADMIN`). Role codes are defined at deploy time;
//! codes that do not appear in the forwarding graph are still legal
//! inputs everywhere and degrade to "no forwards" / "raw code as label".

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A workflow role code.
///
/// The code is stored verbatim; it is never checked against the forwarding
/// graph here. Comparison and hashing are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCode(String);

impl RoleCode {
    /// Creates a role code from a string.
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.to_string())
    }

    /// Returns the raw code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoleCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRoleCode(String::from(
                "code must not be empty",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }
}
