//! Trend extrapolation and confidence intervals.
//!
//! A forecast multiplies the extrapolated trend by the seasonal index of
//! the target quarter. Interval bounds use a normal approximation with a
//! fixed two-sided 95% critical value; when no usable standard error is
//! supplied the bounds are omitted rather than collapsed to zero width.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::seasonal::SeasonalProfile;
use crate::series::{Quarter, SalesSeries};
use crate::trend::TrendModel;

/// Two-sided 95% critical value of the standard normal distribution.
pub const CRITICAL_VALUE_95: f64 = 1.96;

/// A point forecast for one future quarter, with optional interval bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub t: usize,
    pub year: i32,
    pub quarter: Quarter,
    #[serde(rename = "forecast")]
    pub point_forecast: f64,
    #[serde(rename = "lowerCI")]
    pub lower_ci: Option<f64>,
    #[serde(rename = "upperCI")]
    pub upper_ci: Option<f64>,
}

/// Standard error of estimate `sqrt(sum(e^2) / (n - k))` for residuals of
/// a fit with `param_count` estimated parameters (2 for a straight line).
pub fn standard_error_of_estimate(errors: &[f64], param_count: usize) -> Result<f64> {
    let n = errors.len();
    if n <= param_count {
        return Err(Error::DegenerateRegression(format!(
            "standard error needs more than {} residuals, got {}",
            param_count, n
        )));
    }
    let sse: f64 = errors.iter().map(|e| e * e).sum();
    Ok((sse / (n - param_count) as f64).sqrt())
}

/// Forecast one future index. The quarter follows from the cycle phase of
/// `t`; the year continues the series calendar.
pub fn forecast_at(
    series: &SalesSeries,
    trend: &TrendModel,
    profile: &SeasonalProfile,
    t: usize,
    standard_error: Option<f64>,
) -> Forecast {
    let quarter = Quarter::from_index(t);
    let point_forecast = trend.value_at(t as f64) * profile.index(quarter);
    let margin = standard_error
        .filter(|&se| se > 0.0)
        .map(|se| CRITICAL_VALUE_95 * se);
    Forecast {
        t,
        year: series.year_for(t),
        quarter,
        point_forecast,
        lower_ci: margin.map(|m| point_forecast - m),
        upper_ci: margin.map(|m| point_forecast + m),
    }
}

/// Forecast `horizon` consecutive quarters immediately following the last
/// observed index.
pub fn forecast_horizon(
    series: &SalesSeries,
    trend: &TrendModel,
    profile: &SeasonalProfile,
    horizon: usize,
    standard_error: Option<f64>,
) -> Vec<Forecast> {
    let last_t = series.last_t();
    (last_t + 1..=last_t + horizon)
        .map(|t| forecast_at(series, trend, profile, t, standard_error))
        .collect()
}
