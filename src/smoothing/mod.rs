//! Order-4 moving-average smoothing.
//!
//! For quarterly data the order of the cycle is even, so the simple order-4
//! average (MM4) sits between two observations; centering it (MMc4) aligns
//! the smooth with the observed positions. Boundary positions where a full
//! window does not exist stay `None` and are never interpolated.

use serde::{Deserialize, Serialize};

use crate::series::{Quarter, SalesSeries};

/// One position of the smoothed series, parallel to the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedPoint {
    pub t: usize,
    pub year: i32,
    pub quarter: Quarter,
    /// Observed sales at this position.
    pub value: f64,
    /// Order-4 simple moving average, where the window exists.
    pub mm4: Option<f64>,
    /// Centered order-4 moving average, where both MM4 operands exist.
    pub mmc4: Option<f64>,
}

/// Compute the order-4 moving average and its centered form for the whole
/// series.
///
/// MM4 at 0-based position `i` averages the window `[i-1, i+2]` and is
/// therefore defined for `1 <= i <= n-3`; MMc4 averages two consecutive
/// MM4 values and loses one more position at the tail. The first
/// observation never receives either value.
pub fn centered_moving_average(series: &SalesSeries) -> Vec<SmoothedPoint> {
    let observations = series.observations();
    let n = observations.len();
    let values = series.values();

    let mut mm4: Vec<Option<f64>> = vec![None; n];
    for i in 1..n.saturating_sub(2) {
        mm4[i] = Some((values[i - 1] + values[i] + values[i + 1] + values[i + 2]) / 4.0);
    }

    let mut mmc4: Vec<Option<f64>> = vec![None; n];
    for i in 1..n.saturating_sub(1) {
        if let (Some(a), Some(b)) = (mm4[i], mm4[i + 1]) {
            mmc4[i] = Some((a + b) / 2.0);
        }
    }

    observations
        .iter()
        .enumerate()
        .map(|(i, obs)| SmoothedPoint {
            t: obs.t,
            year: obs.year,
            quarter: obs.quarter,
            value: obs.value,
            mm4: mm4[i],
            mmc4: mmc4[i],
        })
        .collect()
}
