// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The five-level location hierarchy vocabulary.
//!
//! The hierarchy is strict: State → District → Zone → Division →
//! PoliceStation. A node at level *n* is only meaningful in combination
//! with a fully-specified ancestor chain; scoping travels in the fetch
//! query, not on the node itself.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the five location hierarchy levels, ordered from root to leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationLevel {
    /// Root level. Loaded once at controller creation, never user-cleared.
    State,
    District,
    Zone,
    Division,
    /// Leaf level. Selecting it triggers no further fetch.
    PoliceStation,
}

impl LocationLevel {
    /// All five levels, root first.
    pub const ALL: [Self; 5] = [
        Self::State,
        Self::District,
        Self::Zone,
        Self::Division,
        Self::PoliceStation,
    ];

    /// Returns the string representation of the level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::District => "district",
            Self::Zone => "zone",
            Self::Division => "division",
            Self::PoliceStation => "police_station",
        }
    }

    /// Returns the immediate parent level, or `None` for `State`.
    #[must_use]
    pub const fn parent(&self) -> Option<Self> {
        match self {
            Self::State => None,
            Self::District => Some(Self::State),
            Self::Zone => Some(Self::District),
            Self::Division => Some(Self::Zone),
            Self::PoliceStation => Some(Self::Division),
        }
    }

    /// Returns the immediate child level, or `None` for `PoliceStation`.
    #[must_use]
    pub const fn child(&self) -> Option<Self> {
        match self {
            Self::State => Some(Self::District),
            Self::District => Some(Self::Zone),
            Self::Zone => Some(Self::Division),
            Self::Division => Some(Self::PoliceStation),
            Self::PoliceStation => None,
        }
    }

    /// Returns the zero-based depth of the level (`State` is 0).
    #[must_use]
    pub const fn depth(&self) -> usize {
        match self {
            Self::State => 0,
            Self::District => 1,
            Self::Zone => 2,
            Self::Division => 3,
            Self::PoliceStation => 4,
        }
    }

    /// Returns true if `other` is strictly below this level.
    #[must_use]
    pub const fn is_ancestor_of(&self, other: Self) -> bool {
        self.depth() < other.depth()
    }
}

impl std::fmt::Display for LocationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LocationLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(Self::State),
            "district" => Ok(Self::District),
            "zone" => Ok(Self::Zone),
            "division" => Ok(Self::Division),
            "police_station" => Ok(Self::PoliceStation),
            _ => Err(DomainError::InvalidLocationLevel(s.to_string())),
        }
    }
}

/// A single node in the location hierarchy.
///
/// Upstream rows may carry ancestor foreign keys (`stateId` on districts
/// and so on); the controller never reads them, so they are not modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationNode {
    /// The numeric identifier assigned by the backend.
    pub id: i64,
    /// The human-readable name.
    pub name: String,
}

impl LocationNode {
    /// Creates a new location node.
    #[must_use]
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// A `{value, label}` pair suitable for direct UI binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// The option value (the node id, stringified).
    pub value: String,
    /// The option label (the node name).
    pub label: String,
}

impl From<&LocationNode> for SelectOption {
    fn from(node: &LocationNode) -> Self {
        Self {
            value: node.id.to_string(),
            label: node.name.clone(),
        }
    }
}
