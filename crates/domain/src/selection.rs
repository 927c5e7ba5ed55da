// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cascading location selection state.
//!
//! A selection is a partial or complete tuple of chosen ids, one per
//! hierarchy level. The cascading invariant lives here: setting level *d*
//! to any value (including empty) unconditionally clears all levels below
//! *d*, so the UI can never hold stale children of an abandoned parent.

use crate::location::LocationLevel;
use serde::{Deserialize, Serialize};

/// The per-form selection across the five hierarchy levels.
///
/// Ids are string-typed identifiers; the empty string means
/// "none selected". One instance is owned per mounted form and discarded
/// on unmount or submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSelection {
    /// The selected state id, or empty.
    pub state: String,
    /// The selected district id, or empty.
    pub district: String,
    /// The selected zone id, or empty.
    pub zone: String,
    /// The selected division id, or empty.
    pub division: String,
    /// The selected police station id, or empty.
    pub police_station: String,
}

impl LocationSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected id at a level, or the empty string.
    #[must_use]
    pub fn get(&self, level: LocationLevel) -> &str {
        match level {
            LocationLevel::State => &self.state,
            LocationLevel::District => &self.district,
            LocationLevel::Zone => &self.zone,
            LocationLevel::Division => &self.division,
            LocationLevel::PoliceStation => &self.police_station,
        }
    }

    /// Returns true if a non-empty id is selected at the level.
    #[must_use]
    pub fn is_selected(&self, level: LocationLevel) -> bool {
        !self.get(level).is_empty()
    }

    /// Returns true if nothing is selected at any level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        LocationLevel::ALL
            .iter()
            .all(|level| !self.is_selected(*level))
    }

    /// Sets the id at a level and clears all deeper levels.
    ///
    /// The clear is unconditional: it happens even when the new id equals
    /// the old one, and even when the new id is empty.
    pub fn select(&mut self, level: LocationLevel, id: &str) {
        self.slot_mut(level).clear();
        self.slot_mut(level).push_str(id);
        self.clear_below(level);
    }

    /// Clears every level strictly below the given one.
    pub fn clear_below(&mut self, level: LocationLevel) {
        for deeper in LocationLevel::ALL {
            if level.is_ancestor_of(deeper) {
                self.slot_mut(deeper).clear();
            }
        }
    }

    /// Clears all five levels.
    pub fn clear_all(&mut self) {
        for level in LocationLevel::ALL {
            self.slot_mut(level).clear();
        }
    }

    fn slot_mut(&mut self, level: LocationLevel) -> &mut String {
        match level {
            LocationLevel::State => &mut self.state,
            LocationLevel::District => &mut self.district,
            LocationLevel::Zone => &mut self.zone,
            LocationLevel::Division => &mut self.division,
            LocationLevel::PoliceStation => &mut self.police_station,
        }
    }
}
