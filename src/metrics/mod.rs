//! Point-forecast accuracy metrics.
//!
//! [`AccuracyMetrics`] is a pure function of parallel (estimated, observed)
//! slices; it knows nothing about which trend model or seasonal profile
//! produced the estimates, so the same scoring applies to every fit the
//! engine compares.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bias, MAE, MSE and RMSE of a set of estimation errors
/// `error[i] = estimated[i] - observed[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// Mean error; positive means systematic overestimation.
    pub bias: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Mean squared error.
    pub mse: f64,
    /// Root mean squared error, in the units of the data.
    pub rmse: f64,
}

impl AccuracyMetrics {
    /// Score parallel estimated and observed slices.
    pub fn from_pairs(estimated: &[f64], observed: &[f64]) -> Result<AccuracyMetrics> {
        if estimated.len() != observed.len() {
            return Err(Error::InvalidInput(format!(
                "estimated and observed lengths differ: {} vs {}",
                estimated.len(),
                observed.len()
            )));
        }
        if estimated.is_empty() {
            return Err(Error::InvalidInput(
                "cannot score an empty set of pairs".to_string(),
            ));
        }

        let n = estimated.len() as f64;
        let errors = estimated.iter().zip(observed.iter()).map(|(e, o)| e - o);

        let mut sum = 0.0;
        let mut sum_abs = 0.0;
        let mut sum_sq = 0.0;
        for error in errors {
            sum += error;
            sum_abs += error.abs();
            sum_sq += error * error;
        }

        let mse = sum_sq / n;
        Ok(AccuracyMetrics {
            bias: sum / n,
            mae: sum_abs / n,
            mse,
            rmse: mse.sqrt(),
        })
    }

    /// Score a slice of pre-computed errors.
    pub fn from_errors(errors: &[f64]) -> Result<AccuracyMetrics> {
        let observed = vec![0.0; errors.len()];
        Self::from_pairs(errors, &observed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let estimated = [12.0, 8.0, 10.0, 10.0];
        let observed = [10.0, 10.0, 10.0, 10.0];
        let metrics = AccuracyMetrics::from_pairs(&estimated, &observed).unwrap();
        assert!((metrics.bias - 0.0).abs() < 1e-12);
        assert!((metrics.mae - 1.0).abs() < 1e-12);
        assert!((metrics.mse - 2.0).abs() < 1e-12);
        assert!((metrics.rmse - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_non_negativity_and_rmse_identity() {
        let estimated = [3.5, -2.0, 7.25, 0.0, 4.0];
        let observed = [1.0, 2.0, 3.0, 4.0, 5.0];
        let metrics = AccuracyMetrics::from_pairs(&estimated, &observed).unwrap();
        assert!(metrics.mae >= 0.0);
        assert!(metrics.mse >= 0.0);
        assert_eq!(metrics.rmse, metrics.mse.sqrt());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = AccuracyMetrics::from_pairs(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_empty_input() {
        let err = AccuracyMetrics::from_pairs(&[], &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
