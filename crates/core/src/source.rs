// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The location data fetcher boundary.
//!
//! The backing location directory lives behind an external REST API. The
//! controller only sees this trait; production uses the HTTP client in
//! `alms-client`, tests use scripted in-memory sources.
//!
//! Scoping contract: each level is fetched with its immediate parent id
//! plus the next ancestor id where the wire contract requires it.

use alms_domain::LocationNode;
use std::future::Future;
use thiserror::Error;

/// Errors surfaced by a location fetch.
///
/// The controller reduces these to a single opaque error string; they
/// never cross the controller boundary as panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The upstream answered with a non-success status code.
    #[error("upstream returned status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not JSON at all.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// A source of location hierarchy data.
///
/// Implementations return nodes in server response order; the controller
/// never re-sorts them. All futures must be `Send` so fetches can run on
/// a multi-threaded runtime.
pub trait LocationSource: Send + Sync {
    /// Fetches all states.
    fn states(&self) -> impl Future<Output = Result<Vec<LocationNode>, FetchError>> + Send;

    /// Fetches the districts of a state.
    fn districts(
        &self,
        state_id: &str,
    ) -> impl Future<Output = Result<Vec<LocationNode>, FetchError>> + Send;

    /// Fetches the zones of a district, additionally scoped by state.
    fn zones(
        &self,
        district_id: &str,
        state_id: &str,
    ) -> impl Future<Output = Result<Vec<LocationNode>, FetchError>> + Send;

    /// Fetches the divisions of a zone, additionally scoped by district.
    fn divisions(
        &self,
        zone_id: &str,
        district_id: &str,
    ) -> impl Future<Output = Result<Vec<LocationNode>, FetchError>> + Send;

    /// Fetches the police stations of a division, additionally scoped by zone.
    fn stations(
        &self,
        division_id: &str,
        zone_id: &str,
    ) -> impl Future<Output = Result<Vec<LocationNode>, FetchError>> + Send;
}
