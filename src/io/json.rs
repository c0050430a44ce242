//! JSON projection of engine output records.

use crate::decomposition::EstimatedPoint;
use crate::error::Result;
use crate::forecast::Forecast;

/// Render the estimated series as pretty-printed JSON.
pub fn estimated_to_json_string(points: &[EstimatedPoint]) -> Result<String> {
    Ok(serde_json::to_string_pretty(points)?)
}

/// Render forecasts as pretty-printed JSON.
pub fn forecasts_to_json_string(forecasts: &[Forecast]) -> Result<String> {
    Ok(serde_json::to_string_pretty(forecasts)?)
}
