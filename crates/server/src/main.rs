// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use alms::{FetchError, LocationSource, RoleGraph};
use alms_client::HttpLocationSource;
use alms_domain::{LocationNode, RoleCode};
use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// ALMS Gateway - HTTP surface for the ALMS workflow core
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the upstream location backend
    #[arg(short, long)]
    upstream: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Per-request timeout for upstream location fetches, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

/// Application state shared across handlers.
struct AppState<S> {
    /// The deploy-time role-forwarding configuration.
    roles: Arc<RoleGraph>,
    /// The upstream location directory.
    locations: Arc<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            roles: Arc::clone(&self.roles),
            locations: Arc::clone(&self.locations),
        }
    }
}

/// One role entry for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoleResponse {
    /// The role code.
    code: String,
    /// The human-readable label.
    display_name: String,
}

/// API response for listing all declared roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListRolesResponse {
    /// The declared roles, in declaration order.
    roles: Vec<RoleResponse>,
}

/// API response for the forwarding options of one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ForwardsResponse {
    /// The role the options belong to.
    code: String,
    /// The forwarding options, in declared order. The first entry is the
    /// default-selected recipient in forwarding UIs. Empty for unknown
    /// and terminal roles.
    forwards: Vec<RoleResponse>,
}

/// One location node for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocationResponse {
    /// The numeric identifier.
    id: i64,
    /// The human-readable name.
    name: String,
}

/// API response for location lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListLocationsResponse {
    /// The locations, in upstream response order.
    locations: Vec<LocationResponse>,
}

/// Query parameters for listing districts.
#[derive(Debug, Deserialize)]
struct DistrictsQuery {
    /// The parent state id.
    state_id: String,
}

/// Query parameters for listing zones.
#[derive(Debug, Deserialize)]
struct ZonesQuery {
    /// The parent district id.
    district_id: String,
    /// The grandparent state id.
    state_id: String,
}

/// Query parameters for listing divisions.
#[derive(Debug, Deserialize)]
struct DivisionsQuery {
    /// The parent zone id.
    zone_id: String,
    /// The grandparent district id.
    district_id: String,
}

/// Query parameters for listing police stations.
#[derive(Debug, Deserialize)]
struct StationsQuery {
    /// The parent division id.
    division_id: String,
    /// The grandparent zone id.
    zone_id: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<FetchError> for HttpError {
    fn from(err: FetchError) -> Self {
        error!(error = %err, "Upstream location fetch failed");
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
        }
    }
}

/// Converts a role code into its response form via the graph.
fn role_to_response(graph: &RoleGraph, code: &RoleCode) -> RoleResponse {
    RoleResponse {
        code: code.value().to_string(),
        display_name: graph.display_name(code).to_string(),
    }
}

/// Converts fetched location nodes into the response form.
fn locations_to_response(nodes: Vec<LocationNode>) -> ListLocationsResponse {
    ListLocationsResponse {
        locations: nodes
            .into_iter()
            .map(|node| LocationResponse {
                id: node.id,
                name: node.name,
            })
            .collect(),
    }
}

/// Handler for GET `/roles` endpoint.
///
/// Lists all declared roles in declaration order.
async fn handle_list_roles<S>(AxumState(state): AxumState<AppState<S>>) -> Json<ListRolesResponse> {
    info!("Handling list_roles request");

    let roles: Vec<RoleResponse> = state
        .roles
        .roles()
        .map(|code| role_to_response(&state.roles, code))
        .collect();

    Json(ListRolesResponse { roles })
}

/// Handler for GET `/roles/{code}` endpoint.
///
/// Returns the display name for a role. Unknown codes degrade to the raw
/// code as label; this is never an error.
async fn handle_get_role<S>(
    AxumState(state): AxumState<AppState<S>>,
    Path(code): Path<String>,
) -> Json<RoleResponse> {
    info!(code = %code, "Handling get_role request");

    let role: RoleCode = RoleCode::new(&code);
    Json(role_to_response(&state.roles, &role))
}

/// Handler for GET `/roles/{code}/forwards` endpoint.
///
/// Returns the roles an application may be forwarded to from the given
/// role, in declared order. Unknown and terminal roles yield an empty
/// list with status 200.
async fn handle_get_forwards<S>(
    AxumState(state): AxumState<AppState<S>>,
    Path(code): Path<String>,
) -> Json<ForwardsResponse> {
    info!(code = %code, "Handling get_forwards request");

    let role: RoleCode = RoleCode::new(&code);
    let forwards: Vec<RoleResponse> = state
        .roles
        .next_roles(&role)
        .iter()
        .map(|target| role_to_response(&state.roles, target))
        .collect();

    Json(ForwardsResponse {
        code: role.value().to_string(),
        forwards,
    })
}

/// Handler for GET `/locations/states` endpoint.
async fn handle_list_states<S: LocationSource>(
    AxumState(state): AxumState<AppState<S>>,
) -> Result<Json<ListLocationsResponse>, HttpError> {
    info!("Handling list_states request");

    let nodes: Vec<LocationNode> = state.locations.states().await?;
    Ok(Json(locations_to_response(nodes)))
}

/// Handler for GET `/locations/districts` endpoint.
async fn handle_list_districts<S: LocationSource>(
    AxumState(state): AxumState<AppState<S>>,
    Query(query): Query<DistrictsQuery>,
) -> Result<Json<ListLocationsResponse>, HttpError> {
    info!(state_id = %query.state_id, "Handling list_districts request");

    let nodes: Vec<LocationNode> = state.locations.districts(&query.state_id).await?;
    Ok(Json(locations_to_response(nodes)))
}

/// Handler for GET `/locations/zones` endpoint.
async fn handle_list_zones<S: LocationSource>(
    AxumState(state): AxumState<AppState<S>>,
    Query(query): Query<ZonesQuery>,
) -> Result<Json<ListLocationsResponse>, HttpError> {
    info!(
        district_id = %query.district_id,
        state_id = %query.state_id,
        "Handling list_zones request"
    );

    let nodes: Vec<LocationNode> = state
        .locations
        .zones(&query.district_id, &query.state_id)
        .await?;
    Ok(Json(locations_to_response(nodes)))
}

/// Handler for GET `/locations/divisions` endpoint.
async fn handle_list_divisions<S: LocationSource>(
    AxumState(state): AxumState<AppState<S>>,
    Query(query): Query<DivisionsQuery>,
) -> Result<Json<ListLocationsResponse>, HttpError> {
    info!(
        zone_id = %query.zone_id,
        district_id = %query.district_id,
        "Handling list_divisions request"
    );

    let nodes: Vec<LocationNode> = state
        .locations
        .divisions(&query.zone_id, &query.district_id)
        .await?;
    Ok(Json(locations_to_response(nodes)))
}

/// Handler for GET `/locations/stations` endpoint.
async fn handle_list_stations<S: LocationSource>(
    AxumState(state): AxumState<AppState<S>>,
    Query(query): Query<StationsQuery>,
) -> Result<Json<ListLocationsResponse>, HttpError> {
    info!(
        division_id = %query.division_id,
        zone_id = %query.zone_id,
        "Handling list_stations request"
    );

    let nodes: Vec<LocationNode> = state
        .locations
        .stations(&query.division_id, &query.zone_id)
        .await?;
    Ok(Json(locations_to_response(nodes)))
}

/// Builds the application router with all endpoints.
fn build_router<S>(app_state: AppState<S>) -> Router
where
    S: LocationSource + 'static,
{
    Router::new()
        .route("/roles", get(handle_list_roles::<S>))
        .route("/roles/{code}", get(handle_get_role::<S>))
        .route("/roles/{code}/forwards", get(handle_get_forwards::<S>))
        .route("/locations/states", get(handle_list_states::<S>))
        .route("/locations/districts", get(handle_list_districts::<S>))
        .route("/locations/zones", get(handle_list_zones::<S>))
        .route("/locations/divisions", get(handle_list_divisions::<S>))
        .route("/locations/stations", get(handle_list_stations::<S>))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing ALMS Gateway");

    let source: HttpLocationSource = HttpLocationSource::new(
        &args.upstream,
        Duration::from_secs(args.timeout_secs),
    )?;

    let app_state: AppState<HttpLocationSource> = AppState {
        roles: Arc::new(RoleGraph::standard()),
        locations: Arc::new(source),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// An in-memory location source keyed by level and scoping ids.
    struct StubSource {
        responses: Mutex<HashMap<String, Result<Vec<LocationNode>, FetchError>>>,
    }

    impl StubSource {
        fn new() -> Self {
            Self {
                responses: Mutex::new(HashMap::new()),
            }
        }

        fn set(&self, key: &str, result: Result<Vec<LocationNode>, FetchError>) {
            self.responses
                .lock()
                .unwrap()
                .insert(key.to_string(), result);
        }

        fn get(&self, key: &str) -> Result<Vec<LocationNode>, FetchError> {
            self.responses
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    impl LocationSource for StubSource {
        async fn states(&self) -> Result<Vec<LocationNode>, FetchError> {
            self.get("states")
        }

        async fn districts(&self, state_id: &str) -> Result<Vec<LocationNode>, FetchError> {
            self.get(&format!("districts:{state_id}"))
        }

        async fn zones(
            &self,
            district_id: &str,
            state_id: &str,
        ) -> Result<Vec<LocationNode>, FetchError> {
            self.get(&format!("zones:{district_id}:{state_id}"))
        }

        async fn divisions(
            &self,
            zone_id: &str,
            district_id: &str,
        ) -> Result<Vec<LocationNode>, FetchError> {
            self.get(&format!("divisions:{zone_id}:{district_id}"))
        }

        async fn stations(
            &self,
            division_id: &str,
            zone_id: &str,
        ) -> Result<Vec<LocationNode>, FetchError> {
            self.get(&format!("stations:{division_id}:{zone_id}"))
        }
    }

    /// Helper to create test app state with the standard role graph.
    fn create_test_app_state(source: StubSource) -> AppState<StubSource> {
        AppState {
            roles: Arc::new(RoleGraph::standard()),
            locations: Arc::new(source),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(app: Router, uri: &str) -> (HttpStatusCode, T) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status: HttpStatusCode = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_roles_returns_declared_roles_in_order() {
        let app: Router = build_router(create_test_app_state(StubSource::new()));

        let (status, response): (HttpStatusCode, ListRolesResponse) =
            get_json(app, "/roles").await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(response.roles.len(), 12);
        assert_eq!(response.roles[0].code, "ADMIN");
        assert_eq!(response.roles[0].display_name, "System Administrator (ADMIN)");
    }

    #[tokio::test]
    async fn test_get_known_role() {
        let app: Router = build_router(create_test_app_state(StubSource::new()));

        let (status, response): (HttpStatusCode, RoleResponse) =
            get_json(app, "/roles/SHO").await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(response.code, "SHO");
        assert_eq!(response.display_name, "Station House Officer (SHO)");
    }

    #[tokio::test]
    async fn test_get_unknown_role_degrades_to_raw_code() {
        let app: Router = build_router(create_test_app_state(StubSource::new()));

        let (status, response): (HttpStatusCode, RoleResponse) =
            get_json(app, "/roles/MYSTERY").await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(response.code, "MYSTERY");
        assert_eq!(response.display_name, "MYSTERY");
    }

    #[tokio::test]
    async fn test_forwards_for_sho_in_declared_order() {
        let app: Router = build_router(create_test_app_state(StubSource::new()));

        let (status, response): (HttpStatusCode, ForwardsResponse) =
            get_json(app, "/roles/SHO/forwards").await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(response.code, "SHO");
        let codes: Vec<&str> = response.forwards.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["ACP", "ZS"]);
        assert_eq!(
            response.forwards[0].display_name,
            "Assistant Commissioner of Police (ACP)"
        );
    }

    #[tokio::test]
    async fn test_forwards_for_unknown_role_is_empty_with_ok_status() {
        let app: Router = build_router(create_test_app_state(StubSource::new()));

        let (status, response): (HttpStatusCode, ForwardsResponse) =
            get_json(app, "/roles/NOPE/forwards").await;

        assert_eq!(status, HttpStatusCode::OK);
        assert!(response.forwards.is_empty());
    }

    #[tokio::test]
    async fn test_list_districts_proxies_upstream() {
        let source: StubSource = StubSource::new();
        source.set(
            "districts:5",
            Ok(vec![
                LocationNode::new(10, "A"),
                LocationNode::new(11, "B"),
            ]),
        );
        let app: Router = build_router(create_test_app_state(source));

        let (status, response): (HttpStatusCode, ListLocationsResponse) =
            get_json(app, "/locations/districts?state_id=5").await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(response.locations.len(), 2);
        assert_eq!(response.locations[0].id, 10);
        assert_eq!(response.locations[0].name, "A");
    }

    #[tokio::test]
    async fn test_list_zones_requires_both_scoping_ids() {
        let source: StubSource = StubSource::new();
        source.set("zones:10:5", Ok(vec![LocationNode::new(20, "Z1")]));
        let app: Router = build_router(create_test_app_state(source));

        let (status, response): (HttpStatusCode, ListLocationsResponse) =
            get_json(app, "/locations/zones?district_id=10&state_id=5").await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(response.locations.len(), 1);
        assert_eq!(response.locations[0].name, "Z1");
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_bad_gateway() {
        let source: StubSource = StubSource::new();
        source.set(
            "states",
            Err(FetchError::Network(String::from("connection refused"))),
        );
        let app: Router = build_router(create_test_app_state(source));

        let (status, response): (HttpStatusCode, ErrorResponse) =
            get_json(app, "/locations/states").await;

        assert_eq!(status, HttpStatusCode::BAD_GATEWAY);
        assert!(response.error);
        assert!(response.message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_unscoped_station_request_is_rejected() {
        let app: Router = build_router(create_test_app_state(StubSource::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/locations/stations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Missing required query parameters.
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }
}
