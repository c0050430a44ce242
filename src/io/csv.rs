//! CSV projection of estimated points and forecasts.
//!
//! One row per record; estimated points carry the columns
//! `t, year, quarter, sales, trend, seasonalIndex, estimated,
//! residualRatio, cvs` and forecasts
//! `t, year, quarter, forecast, lowerCI, upperCI`. Missing interval
//! bounds serialize as empty cells.

use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::decomposition::EstimatedPoint;
use crate::error::Result;
use crate::forecast::Forecast;

fn write_records<W: Write, T: Serialize>(writer: W, records: &[T]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn records_to_string<T: Serialize>(records: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, records)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write the estimated series as CSV to a file.
pub fn write_estimated_csv<P: AsRef<Path>>(path: P, points: &[EstimatedPoint]) -> Result<()> {
    write_records(File::create(path.as_ref())?, points)
}

/// Render the estimated series as a CSV string.
pub fn estimated_to_csv_string(points: &[EstimatedPoint]) -> Result<String> {
    records_to_string(points)
}

/// Write forecasts as CSV to a file.
pub fn write_forecasts_csv<P: AsRef<Path>>(path: P, forecasts: &[Forecast]) -> Result<()> {
    write_records(File::create(path.as_ref())?, forecasts)
}

/// Render forecasts as a CSV string.
pub fn forecasts_to_csv_string(forecasts: &[Forecast]) -> Result<String> {
    records_to_string(forecasts)
}
