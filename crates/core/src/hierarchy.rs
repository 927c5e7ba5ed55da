// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The cascading location hierarchy controller.
//!
//! Manages the five-level dependent selection (State → District → Zone →
//! Division → PoliceStation) and orchestrates the dependent data fetches.
//! Selecting a level synchronously clears every deeper selection and
//! option list, then fetches the next level's options asynchronously.
//!
//! Overlapping fetches for one level are resolved with per-level
//! generation counters: every mutation of a level bumps the generation of
//! that level's slot and all deeper slots, and a response is applied only
//! if its captured generation still matches. A stale response (success or
//! failure) is discarded without touching any state. The original system
//! applied whichever response resolved last; the generation tag is a
//! deliberate fix, not a silent behavior change.
//!
//! One controller instance is owned per mounted form. State lives behind
//! a `tokio::sync::Mutex`; no guard is ever held across an await, so the
//! lock cannot wedge the event loop.

use crate::source::{FetchError, LocationSource};
use alms_domain::{LocationLevel, LocationNode, LocationSelection, SelectOption};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Per-level option list state.
#[derive(Debug, Clone, Default)]
struct LevelSlot {
    /// The current option list, in server response order.
    options: Vec<LocationNode>,
    /// True while a fetch for this level is in flight.
    loading: bool,
    /// Bumped on every mutation that invalidates this level.
    generation: u64,
}

/// The complete controller state, guarded by one mutex.
#[derive(Debug, Default)]
struct Inner {
    /// One slot per hierarchy level, indexed by level depth.
    slots: [LevelSlot; 5],
    /// The current selection.
    selection: LocationSelection,
    /// The shared error slot. Last error wins; no per-level history.
    error: Option<String>,
}

impl Inner {
    fn slot(&self, level: LocationLevel) -> &LevelSlot {
        &self.slots[level.depth()]
    }

    fn slot_mut(&mut self, level: LocationLevel) -> &mut LevelSlot {
        &mut self.slots[level.depth()]
    }

    /// Wipes every slot strictly below `level` and invalidates any fetch
    /// still in flight for those levels.
    fn invalidate_below(&mut self, level: LocationLevel) {
        for deeper in LocationLevel::ALL {
            if level.is_ancestor_of(deeper) {
                let slot: &mut LevelSlot = self.slot_mut(deeper);
                slot.options.clear();
                slot.loading = false;
                slot.generation += 1;
            }
        }
    }
}

/// A fetch admitted by `begin`: the generation it must still match on
/// arrival, plus the nearest-selected ancestor id for query scoping.
struct PendingFetch {
    token: u64,
    ancestor: String,
}

/// Per-level loading flags, one independent flag per hierarchy level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub states: bool,
    pub districts: bool,
    pub zones: bool,
    pub divisions: bool,
    pub police_stations: bool,
}

/// A point-in-time copy of the controller state for a view to read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchySnapshot {
    /// The state option list.
    pub states: Vec<LocationNode>,
    /// The district option list.
    pub districts: Vec<LocationNode>,
    /// The zone option list.
    pub zones: Vec<LocationNode>,
    /// The division option list.
    pub divisions: Vec<LocationNode>,
    /// The police station option list.
    pub police_stations: Vec<LocationNode>,
    /// The current selection.
    pub selection: LocationSelection,
    /// The per-level loading flags.
    pub loading: LoadingFlags,
    /// The shared error message, if any fetch has failed.
    pub error: Option<String>,
}

/// The five option lists projected into `{value, label}` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptionSets {
    pub states: Vec<SelectOption>,
    pub districts: Vec<SelectOption>,
    pub zones: Vec<SelectOption>,
    pub divisions: Vec<SelectOption>,
    pub police_stations: Vec<SelectOption>,
}

/// The cascading selection engine over a [`LocationSource`].
///
/// Cheap to clone; clones share the same state and source.
pub struct HierarchyController<S> {
    source: Arc<S>,
    inner: Arc<Mutex<Inner>>,
}

impl<S> Clone for HierarchyController<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: LocationSource> HierarchyController<S> {
    /// Creates a controller with an empty selection and empty option
    /// lists. Call [`Self::load_states`] once to populate the root level.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Loads the state option list.
    ///
    /// Intended to run once at controller creation; the list survives
    /// [`Self::reset_hierarchy`]. Calling it again reloads the list and
    /// supersedes any load still in flight.
    pub async fn load_states(&self) {
        let token: u64 = {
            let mut inner = self.inner.lock().await;
            let slot: &mut LevelSlot = inner.slot_mut(LocationLevel::State);
            slot.loading = true;
            slot.generation += 1;
            slot.generation
        };
        let result: Result<Vec<LocationNode>, FetchError> = self.source.states().await;
        self.apply(LocationLevel::State, token, result).await;
    }

    /// Selects a state and fetches its districts.
    ///
    /// All deeper selections and option lists are cleared synchronously,
    /// before the fetch resolves. An empty id clears without fetching.
    pub async fn set_selected_state(&self, id: &str) {
        let Some(pending) = self.begin(LocationLevel::State, id).await else {
            return;
        };
        let result: Result<Vec<LocationNode>, FetchError> = self.source.districts(id).await;
        self.apply(LocationLevel::District, pending.token, result)
            .await;
    }

    /// Selects a district and fetches its zones, scoped by the selected
    /// state.
    pub async fn set_selected_district(&self, id: &str) {
        let Some(pending) = self.begin(LocationLevel::District, id).await else {
            return;
        };
        let result: Result<Vec<LocationNode>, FetchError> =
            self.source.zones(id, &pending.ancestor).await;
        self.apply(LocationLevel::Zone, pending.token, result).await;
    }

    /// Selects a zone and fetches its divisions, scoped by the selected
    /// district.
    pub async fn set_selected_zone(&self, id: &str) {
        let Some(pending) = self.begin(LocationLevel::Zone, id).await else {
            return;
        };
        let result: Result<Vec<LocationNode>, FetchError> =
            self.source.divisions(id, &pending.ancestor).await;
        self.apply(LocationLevel::Division, pending.token, result)
            .await;
    }

    /// Selects a division and fetches its police stations, scoped by the
    /// selected zone.
    pub async fn set_selected_division(&self, id: &str) {
        let Some(pending) = self.begin(LocationLevel::Division, id).await else {
            return;
        };
        let result: Result<Vec<LocationNode>, FetchError> =
            self.source.stations(id, &pending.ancestor).await;
        self.apply(LocationLevel::PoliceStation, pending.token, result)
            .await;
    }

    /// Selects a police station. Terminal: no fetch, clears nothing.
    pub async fn set_selected_police_station(&self, id: &str) {
        // begin() never admits a fetch for the leaf level.
        let _ = self.begin(LocationLevel::PoliceStation, id).await;
    }

    /// Clears all five selections, the four dependent option lists, and
    /// the error slot. The state option list is retained.
    pub async fn reset_hierarchy(&self) {
        let mut inner = self.inner.lock().await;
        inner.selection.clear_all();
        inner.invalidate_below(LocationLevel::State);
        inner.error = None;
    }

    /// Returns a copy of the full controller state.
    pub async fn snapshot(&self) -> HierarchySnapshot {
        let inner = self.inner.lock().await;
        HierarchySnapshot {
            states: inner.slot(LocationLevel::State).options.clone(),
            districts: inner.slot(LocationLevel::District).options.clone(),
            zones: inner.slot(LocationLevel::Zone).options.clone(),
            divisions: inner.slot(LocationLevel::Division).options.clone(),
            police_stations: inner.slot(LocationLevel::PoliceStation).options.clone(),
            selection: inner.selection.clone(),
            loading: LoadingFlags {
                states: inner.slot(LocationLevel::State).loading,
                districts: inner.slot(LocationLevel::District).loading,
                zones: inner.slot(LocationLevel::Zone).loading,
                divisions: inner.slot(LocationLevel::Division).loading,
                police_stations: inner.slot(LocationLevel::PoliceStation).loading,
            },
            error: inner.error.clone(),
        }
    }

    /// Projects the five option lists into `{value, label}` pairs,
    /// preserving list order. Pure read; repeated calls with no
    /// intervening mutation yield structurally equal results.
    pub async fn select_options(&self) -> SelectOptionSets {
        let inner = self.inner.lock().await;
        let project = |level: LocationLevel| -> Vec<SelectOption> {
            inner.slot(level).options.iter().map(SelectOption::from).collect()
        };
        SelectOptionSets {
            states: project(LocationLevel::State),
            districts: project(LocationLevel::District),
            zones: project(LocationLevel::Zone),
            divisions: project(LocationLevel::Division),
            police_stations: project(LocationLevel::PoliceStation),
        }
    }

    /// Applies a selection at `level`: records the id, synchronously
    /// wipes everything below, and admits a fetch for the child level if
    /// one is due.
    ///
    /// Returns `None` when no fetch follows (leaf level, or empty id).
    async fn begin(&self, level: LocationLevel, id: &str) -> Option<PendingFetch> {
        let mut inner = self.inner.lock().await;
        let ancestor: String = level
            .parent()
            .map_or_else(String::new, |parent| inner.selection.get(parent).to_string());
        inner.selection.select(level, id);
        inner.invalidate_below(level);
        let child: LocationLevel = level.child()?;
        if id.is_empty() {
            return None;
        }
        let slot: &mut LevelSlot = inner.slot_mut(child);
        slot.loading = true;
        debug!(level = %child, parent_id = %id, "starting location fetch");
        Some(PendingFetch {
            token: slot.generation,
            ancestor,
        })
    }

    /// Applies a fetch outcome to `level` if its generation still
    /// matches; otherwise the response lost the race and is dropped.
    async fn apply(
        &self,
        level: LocationLevel,
        token: u64,
        result: Result<Vec<LocationNode>, FetchError>,
    ) {
        let mut inner = self.inner.lock().await;
        if inner.slot(level).generation != token {
            debug!(level = %level, "discarding stale location fetch response");
            return;
        }
        let slot: &mut LevelSlot = inner.slot_mut(level);
        slot.loading = false;
        match result {
            Ok(nodes) => {
                slot.options = nodes;
            }
            Err(err) => {
                warn!(level = %level, error = %err, "location fetch failed");
                inner.error = Some(err.to_string());
            }
        }
    }
}
