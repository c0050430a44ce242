//! Linear trend estimation.
//!
//! Two fitting methods are provided: ordinary least squares (the baseline
//! used by the rest of the engine) and the semi-average method, a
//! comparison fit that is less sensitive to outliers. Both produce an
//! immutable [`TrendModel`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::series::SalesSeries;

/// A fitted linear trend `Tt = intercept + slope * t`.
///
/// Never mutated after creation; the original and CVS re-estimated trends
/// coexist as independent instances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub intercept: f64,
    pub slope: f64,
}

impl TrendModel {
    /// Evaluate the trend at any real index, including future `t > n`.
    pub fn value_at(&self, t: f64) -> f64 {
        self.intercept + self.slope * t
    }
}

/// Fit a linear trend by ordinary least squares of value on index.
pub fn fit_least_squares(series: &SalesSeries) -> Result<TrendModel> {
    let n = series.len() as f64;
    let mut sum_t = 0.0;
    let mut sum_y = 0.0;
    let mut sum_t2 = 0.0;
    let mut sum_ty = 0.0;
    for obs in series.iter() {
        let t = obs.t as f64;
        sum_t += t;
        sum_y += obs.value;
        sum_t2 += t * t;
        sum_ty += t * obs.value;
    }

    let denominator = n * sum_t2 - sum_t * sum_t;
    if denominator == 0.0 {
        return Err(Error::DegenerateRegression(format!(
            "least-squares denominator is zero for n={}",
            series.len()
        )));
    }

    let slope = (n * sum_ty - sum_t * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_t) / n;
    Ok(TrendModel { intercept, slope })
}

/// Fit a linear trend by the semi-average method: split the series into
/// two equal halves, average each half, and run a line through the two
/// (mean index, mean value) points.
///
/// Cross-check fit only; downstream estimation always uses least squares.
pub fn fit_semi_average(series: &SalesSeries) -> Result<TrendModel> {
    let observations = series.observations();
    let mid = observations.len() / 2;
    let (first, second) = observations.split_at(mid);

    let mean_first = first.iter().map(|o| o.value).sum::<f64>() / first.len() as f64;
    let mean_second = second.iter().map(|o| o.value).sum::<f64>() / second.len() as f64;

    // Midpoint of each half's index range; equal to the mean index for a
    // contiguous series.
    let t_first = (first[0].t as f64 + first[first.len() - 1].t as f64) / 2.0;
    let t_second = (second[0].t as f64 + second[second.len() - 1].t as f64) / 2.0;

    if t_second == t_first {
        return Err(Error::DegenerateRegression(
            "semi-average halves share the same mean index".to_string(),
        ));
    }

    let slope = (mean_second - mean_first) / (t_second - t_first);
    let intercept = mean_first - slope * t_first;
    Ok(TrendModel { intercept, slope })
}
