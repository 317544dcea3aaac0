//! JSON view of the request counters.
//!
//! ```text
//! GET /metrics
//! ```
//!
//! `status_counts` and `path_counts` render as JSON objects whose key order
//! follows the snapshot: status codes ascending, paths busiest first.

use actix_web::{get, web};
use serde::ser::{Serialize, SerializeMap, Serializer};
use utoipa::ToSchema;

use crate::domain::TelemetrySnapshot;
use crate::inbound::http::state::HttpState;

/// Counts keyed by label, serialized as an object in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedCounts(Vec<(String, u64)>);

impl Serialize for OrderedCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Telemetry snapshot payload.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct MetricsResponse {
    /// Requests handled since start-up.
    pub total_requests: u64,
    /// Requests answered with a status of 400 or above.
    pub total_errors: u64,
    /// Mean latency in milliseconds.
    pub avg_ms: f64,
    /// Requests per status code.
    #[schema(value_type = Object)]
    pub status_counts: OrderedCounts,
    /// Requests per path.
    #[schema(value_type = Object)]
    pub path_counts: OrderedCounts,
}

impl From<TelemetrySnapshot> for MetricsResponse {
    fn from(snapshot: TelemetrySnapshot) -> Self {
        Self {
            total_requests: snapshot.total_requests,
            total_errors: snapshot.total_errors,
            avg_ms: snapshot.avg_ms,
            status_counts: OrderedCounts(
                snapshot
                    .status_counts
                    .into_iter()
                    .map(|(status, count)| (status.to_string(), count))
                    .collect(),
            ),
            path_counts: OrderedCounts(snapshot.path_counts),
        }
    }
}

/// Return the request counters.
#[utoipa::path(
    get,
    path = "/metrics",
    tags = ["health"],
    responses((status = 200, description = "Request counters", body = MetricsResponse))
)]
#[get("/metrics")]
pub async fn metrics(state: web::Data<HttpState>) -> web::Json<MetricsResponse> {
    web::Json(MetricsResponse::from(state.telemetry.snapshot()))
}
