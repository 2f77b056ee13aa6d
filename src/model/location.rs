use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coordinates captured by the browser at clock time. Acquisition happens
/// client-side with a 10 s timeout and tolerance for positions cached up to
/// 5 minutes; the API only records what the client obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({ "latitude": 23.8103, "longitude": 90.4125, "accuracy": 12.5 }))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in meters reported by the positioning source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}
