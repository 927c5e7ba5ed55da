// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A role code is empty or malformed.
    InvalidRoleCode(String),
    /// A location level name does not match any of the five levels.
    InvalidLocationLevel(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoleCode(msg) => write!(f, "Invalid role code: {msg}"),
            Self::InvalidLocationLevel(name) => {
                write!(f, "Invalid location level: '{name}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
