//! Seasonal index estimation for the multiplicative model.
//!
//! Three estimation methods are offered, all ending in the same
//! normalization step that rescales the four per-quarter indices so their
//! product is exactly 1, the defining constraint of a multiplicative
//! seasonal profile. Which method to use is the caller's choice; see
//! [`evaluate_all_methods`] for a side-by-side comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::metrics::AccuracyMetrics;
use crate::series::{Quarter, SalesSeries};
use crate::smoothing::centered_moving_average;
use crate::trend::TrendModel;

/// Tolerance for the multiplicative-identity invariant.
pub const PRODUCT_TOLERANCE: f64 = 1e-6;

/// Seasonal-index estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeasonalMethod {
    /// Mean of per-quarter ratios to the least-squares trend.
    SimpleAverages,
    /// Same computation as `SimpleAverages`; kept as a distinct selectable
    /// name.
    RatioToTrend,
    /// Mean of per-quarter ratios to the centered moving average, boundary
    /// positions excluded.
    RatioToMovingAverage,
}

impl SeasonalMethod {
    /// All methods in presentation order.
    pub const ALL: [SeasonalMethod; 3] = [
        SeasonalMethod::SimpleAverages,
        SeasonalMethod::RatioToTrend,
        SeasonalMethod::RatioToMovingAverage,
    ];

    /// Stable method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonalMethod::SimpleAverages => "simple-averages",
            SeasonalMethod::RatioToTrend => "ratio-to-trend",
            SeasonalMethod::RatioToMovingAverage => "ratio-to-moving-average",
        }
    }

    /// Parse a stable method name.
    pub fn from_str(s: &str) -> Option<SeasonalMethod> {
        match s {
            "simple-averages" => Some(SeasonalMethod::SimpleAverages),
            "ratio-to-trend" => Some(SeasonalMethod::RatioToTrend),
            "ratio-to-moving-average" => Some(SeasonalMethod::RatioToMovingAverage),
            _ => None,
        }
    }
}

impl fmt::Display for SeasonalMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized per-quarter seasonal indices.
///
/// Constructed only through estimation, which applies the multiplicative
/// correction; the product of the four stored indices is 1 within
/// [`PRODUCT_TOLERANCE`] by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonalProfile {
    method: SeasonalMethod,
    indices: [f64; 4],
    raw_product: f64,
    correction_factor: f64,
}

impl SeasonalProfile {
    /// Apply the multiplicative-identity correction to raw indices:
    /// `corrected[q] = raw[q] * (product of raw)^(-1/4)`.
    fn from_raw(method: SeasonalMethod, raw: [f64; 4]) -> SeasonalProfile {
        let raw_product: f64 = raw.iter().product();
        let correction_factor = raw_product.powf(-0.25);
        let mut indices = raw;
        for index in indices.iter_mut() {
            *index *= correction_factor;
        }
        SeasonalProfile {
            method,
            indices,
            raw_product,
            correction_factor,
        }
    }

    /// The method that produced this profile.
    pub fn method(&self) -> SeasonalMethod {
        self.method
    }

    /// Corrected index for one quarter.
    pub fn index(&self, quarter: Quarter) -> f64 {
        self.indices[quarter.position()]
    }

    /// All four corrected indices in cycle order.
    pub fn indices(&self) -> [f64; 4] {
        self.indices
    }

    /// Product of the raw indices before correction.
    pub fn raw_product(&self) -> f64 {
        self.raw_product
    }

    /// The applied correction factor `(raw product)^(-1/4)`.
    pub fn correction_factor(&self) -> f64 {
        self.correction_factor
    }

    /// Product of the corrected indices; 1 within [`PRODUCT_TOLERANCE`].
    pub fn product(&self) -> f64 {
        self.indices.iter().product()
    }

    /// Percentage deviation from the no-seasonality level,
    /// `(index - 1) * 100`, in cycle order.
    pub fn percentages(&self) -> [f64; 4] {
        self.indices.map(|index| (index - 1.0) * 100.0)
    }
}

/// Estimate a normalized seasonal profile for the series.
///
/// `trend` is the least-squares trend of the series; it is the reference
/// for the two trend-ratio methods and ignored by the moving-average
/// method.
pub fn estimate(
    series: &SalesSeries,
    method: SeasonalMethod,
    trend: &TrendModel,
) -> Result<SeasonalProfile> {
    let raw = match method {
        // Ratio-to-trend shares the simple-averages code path; the two
        // names stay distinct in the public method set.
        SeasonalMethod::SimpleAverages | SeasonalMethod::RatioToTrend => {
            trend_ratio_indices(series, trend)?
        }
        SeasonalMethod::RatioToMovingAverage => moving_average_ratio_indices(series)?,
    };
    Ok(SeasonalProfile::from_raw(method, raw))
}

/// Raw indices from ratios of observed values to the fitted trend.
fn trend_ratio_indices(series: &SalesSeries, trend: &TrendModel) -> Result<[f64; 4]> {
    raw_indices(
        series
            .iter()
            .map(|obs| (obs.quarter, obs.value / trend.value_at(obs.t as f64))),
    )
}

/// Raw indices from ratios of observed values to the centered moving
/// average, restricted to positions where MMc4 exists.
fn moving_average_ratio_indices(series: &SalesSeries) -> Result<[f64; 4]> {
    raw_indices(
        centered_moving_average(series)
            .into_iter()
            .filter_map(|point| {
                point
                    .mmc4
                    .filter(|&mmc4| mmc4 > 0.0)
                    .map(|mmc4| (point.quarter, point.value / mmc4))
            }),
    )
}

/// Group ratios by quarter and average each group.
fn raw_indices(ratios: impl Iterator<Item = (Quarter, f64)>) -> Result<[f64; 4]> {
    let mut sums = [0.0; 4];
    let mut counts = [0usize; 4];
    for (quarter, ratio) in ratios {
        sums[quarter.position()] += ratio;
        counts[quarter.position()] += 1;
    }

    let mut raw = [0.0; 4];
    for quarter in Quarter::ALL {
        let position = quarter.position();
        if counts[position] == 0 {
            return Err(Error::InsufficientData(format!(
                "no contributing ratios for {}",
                quarter
            )));
        }
        raw[position] = sums[position] / counts[position] as f64;
    }
    Ok(raw)
}

/// One method's profile scored against the observed series.
#[derive(Debug, Clone, Serialize)]
pub struct MethodEvaluation {
    pub method: SeasonalMethod,
    pub profile: SeasonalProfile,
    pub accuracy: AccuracyMetrics,
}

/// Estimate all three methods side by side and score each against the
/// observed series using the given trend.
///
/// A method that fails with [`Error::InsufficientData`] is skipped so the
/// remaining methods stay usable; any other error propagates.
pub fn evaluate_all_methods(
    series: &SalesSeries,
    trend: &TrendModel,
) -> Result<Vec<MethodEvaluation>> {
    let observed = series.values();
    let mut evaluations = Vec::with_capacity(SeasonalMethod::ALL.len());
    for method in SeasonalMethod::ALL {
        let profile = match estimate(series, method, trend) {
            Ok(profile) => profile,
            Err(Error::InsufficientData(reason)) => {
                log::debug!("skipping {}: {}", method, reason);
                continue;
            }
            Err(error) => return Err(error),
        };
        let estimated: Vec<f64> = series
            .iter()
            .map(|obs| trend.value_at(obs.t as f64) * profile.index(obs.quarter))
            .collect();
        let accuracy = AccuracyMetrics::from_pairs(&estimated, &observed)?;
        evaluations.push(MethodEvaluation {
            method,
            profile,
            accuracy,
        });
    }
    Ok(evaluations)
}
