//! Serialization of engine output records for external consumers.
//!
//! The engine itself never renders anything; these helpers project the
//! derived records into flat CSV rows and JSON payloads that exporters and
//! presentation layers consume as-is.

pub mod csv;
pub mod json;

pub use self::csv::{
    estimated_to_csv_string, forecasts_to_csv_string, write_estimated_csv, write_forecasts_csv,
};
pub use self::json::{estimated_to_json_string, forecasts_to_json_string};
