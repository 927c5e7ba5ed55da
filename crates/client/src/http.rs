// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP implementation of the location source boundary.
//!
//! Wraps `reqwest::Client` over the upstream location REST API. Every
//! response body goes through envelope normalization, so an inconsistent
//! upstream never produces a decode error here. The police station
//! endpoint falls back to the legacy `/locations/police-stations` route
//! when the current one answers 404.

use crate::normalize::normalize_nodes;
use alms::{FetchError, LocationSource};
use alms_domain::LocationNode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// A `LocationSource` backed by the upstream location REST API.
#[derive(Debug, Clone)]
pub struct HttpLocationSource {
    /// Base URL of the upstream, without a trailing slash.
    base_url: String,
    /// Underlying HTTP client.
    http: reqwest::Client,
}

impl HttpLocationSource {
    /// Creates a client against the given upstream base URL.
    ///
    /// Every request carries the given timeout; the original system had
    /// none, which left a hung fetch loading forever.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Joins the base URL with an endpoint path.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Performs one GET and normalizes the response body.
    async fn fetch(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<LocationNode>, FetchError> {
        let url: String = self.url(path);
        debug!(url = %url, "fetching location data");

        let response: reqwest::Response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status: reqwest::StatusCode = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "location fetch rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidBody(e.to_string()))?;
        Ok(normalize_nodes(&body))
    }
}

impl LocationSource for HttpLocationSource {
    async fn states(&self) -> Result<Vec<LocationNode>, FetchError> {
        self.fetch("/locations/states", &[]).await
    }

    async fn districts(&self, state_id: &str) -> Result<Vec<LocationNode>, FetchError> {
        self.fetch("/locations/districts", &[("stateId", state_id)])
            .await
    }

    async fn zones(
        &self,
        district_id: &str,
        state_id: &str,
    ) -> Result<Vec<LocationNode>, FetchError> {
        self.fetch(
            "/locations/zones",
            &[("districtId", district_id), ("stateId", state_id)],
        )
        .await
    }

    async fn divisions(
        &self,
        zone_id: &str,
        district_id: &str,
    ) -> Result<Vec<LocationNode>, FetchError> {
        self.fetch(
            "/locations/divisions",
            &[("zoneId", zone_id), ("districtId", district_id)],
        )
        .await
    }

    async fn stations(
        &self,
        division_id: &str,
        zone_id: &str,
    ) -> Result<Vec<LocationNode>, FetchError> {
        let query: [(&str, &str); 2] = [("divisionId", division_id), ("zoneId", zone_id)];
        match self.fetch("/locations/stations", &query).await {
            Err(FetchError::Status { status: 404 }) => {
                debug!("stations route missing, trying legacy police-stations route");
                self.fetch("/locations/police-stations", &query).await
            }
            other => other,
        }
    }
}
