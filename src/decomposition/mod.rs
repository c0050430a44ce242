//! The multiplicative decomposition pipeline.
//!
//! [`Decomposition`] ties a validated series to a fitted trend and a
//! normalized seasonal profile, and derives everything else on demand:
//! estimated points, accuracy metrics, the deseasonalized (CVS) series,
//! the re-estimated trend, and forecasts. Derived values are recomputed
//! per call from the owned trend and profile; nothing is cached or patched
//! in place.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::forecast::{self, Forecast};
use crate::metrics::AccuracyMetrics;
use crate::seasonal::{self, SeasonalMethod, SeasonalProfile};
use crate::series::{Observation, Quarter, SalesSeries};
use crate::trend::{self, TrendModel};

/// One observation with all derived columns of the multiplicative model.
///
/// Also the flat record shape consumed by external exporters; field names
/// serialize in camelCase with the `seasonalIndex` column name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedPoint {
    pub t: usize,
    pub year: i32,
    pub quarter: Quarter,
    pub sales: f64,
    pub trend: f64,
    #[serde(rename = "seasonalIndex")]
    pub seasonal: f64,
    /// `trend * seasonal`.
    pub estimated: f64,
    /// `sales / estimated`; departure from 1 is unexplained variation.
    pub residual_ratio: f64,
    /// Deseasonalized value `sales / seasonal`.
    pub cvs: f64,
}

/// Accuracy of the original fit and of the CVS re-estimated fit, side by
/// side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelComparison {
    pub original: AccuracyMetrics,
    pub reestimated: AccuracyMetrics,
}

impl ModelComparison {
    /// Whether the re-estimated fit has the lower MAE.
    pub fn reestimation_improves(&self) -> bool {
        self.reestimated.mae < self.original.mae
    }
}

/// Options for the bounded iterative refinement loop.
#[derive(Debug, Clone, Copy)]
pub struct RefineOptions {
    /// Hard iteration cap; refinement always terminates.
    pub max_iterations: usize,
    /// Stop once the MAE change between iterations falls below this.
    pub mae_tolerance: f64,
}

impl Default for RefineOptions {
    fn default() -> Self {
        RefineOptions {
            max_iterations: 20,
            mae_tolerance: 0.01,
        }
    }
}

/// Outcome of the refinement loop: the last achieved state, never a
/// failure on non-convergence.
#[derive(Debug, Clone)]
pub struct Refinement {
    /// Decomposition with the final trend and profile.
    pub decomposition: Decomposition,
    /// Iterations actually run.
    pub iterations: usize,
    /// Whether the MAE change fell below the tolerance before the cap.
    pub converged: bool,
    /// Accuracy of the final state.
    pub accuracy: AccuracyMetrics,
}

/// A fitted multiplicative decomposition of one sales series.
#[derive(Debug, Clone)]
pub struct Decomposition {
    series: SalesSeries,
    method: SeasonalMethod,
    trend: TrendModel,
    profile: SeasonalProfile,
}

impl Decomposition {
    /// Fit the least-squares trend and the requested seasonal method.
    pub fn fit(series: SalesSeries, method: SeasonalMethod) -> Result<Decomposition> {
        let trend = trend::fit_least_squares(&series)?;
        let profile = seasonal::estimate(&series, method, &trend)?;
        Ok(Decomposition {
            series,
            method,
            trend,
            profile,
        })
    }

    /// Pair an already fitted trend and profile with the series.
    pub fn from_parts(
        series: SalesSeries,
        method: SeasonalMethod,
        trend: TrendModel,
        profile: SeasonalProfile,
    ) -> Decomposition {
        Decomposition {
            series,
            method,
            trend,
            profile,
        }
    }

    pub fn series(&self) -> &SalesSeries {
        &self.series
    }

    pub fn method(&self) -> SeasonalMethod {
        self.method
    }

    pub fn trend(&self) -> TrendModel {
        self.trend
    }

    pub fn profile(&self) -> &SeasonalProfile {
        &self.profile
    }

    /// Derive the full estimated series: trend, seasonal index, estimate,
    /// residual ratio and CVS per observation.
    pub fn estimated_points(&self) -> Vec<EstimatedPoint> {
        self.series
            .iter()
            .map(|obs| {
                let trend = self.trend.value_at(obs.t as f64);
                let seasonal = self.profile.index(obs.quarter);
                let estimated = trend * seasonal;
                EstimatedPoint {
                    t: obs.t,
                    year: obs.year,
                    quarter: obs.quarter,
                    sales: obs.value,
                    trend,
                    seasonal,
                    estimated,
                    residual_ratio: obs.value / estimated,
                    cvs: obs.value / seasonal,
                }
            })
            .collect()
    }

    /// Estimation errors `estimated - observed` per observation.
    fn errors(&self) -> Vec<f64> {
        self.estimated_points()
            .iter()
            .map(|p| p.estimated - p.sales)
            .collect()
    }

    /// Accuracy of this fit against the observed series.
    pub fn accuracy(&self) -> Result<AccuracyMetrics> {
        AccuracyMetrics::from_errors(&self.errors())
    }

    /// Standard error of estimate of this fit (two trend parameters).
    pub fn standard_error(&self) -> Result<f64> {
        forecast::standard_error_of_estimate(&self.errors(), 2)
    }

    /// The deseasonalized (CVS) values, `value / index`, in order.
    pub fn deseasonalized(&self) -> Vec<f64> {
        self.series
            .iter()
            .map(|obs| obs.value / self.profile.index(obs.quarter))
            .collect()
    }

    /// The CVS values as a series with the original calendar, suitable for
    /// refitting.
    fn deseasonalized_series(&self) -> Result<SalesSeries> {
        let observations: Vec<Observation> = self
            .series
            .iter()
            .map(|obs| Observation {
                value: obs.value / self.profile.index(obs.quarter),
                ..*obs
            })
            .collect();
        SalesSeries::new(observations)
    }

    /// Single re-estimation step: refit the trend by least squares on the
    /// CVS series, keeping the current seasonal profile.
    ///
    /// Returns an independent decomposition; the original is untouched.
    pub fn reestimate(&self) -> Result<Decomposition> {
        let reestimated_trend = trend::fit_least_squares(&self.deseasonalized_series()?)?;
        Ok(Decomposition {
            series: self.series.clone(),
            method: self.method,
            trend: reestimated_trend,
            profile: self.profile,
        })
    }

    /// Accuracy of the original fit and the single-step re-estimated fit,
    /// side by side.
    pub fn compare_reestimated(&self) -> Result<ModelComparison> {
        Ok(ModelComparison {
            original: self.accuracy()?,
            reestimated: self.reestimate()?.accuracy()?,
        })
    }

    /// Bounded iterative refinement: alternate trend refit on CVS and
    /// seasonal re-estimation against the new trend until the MAE change
    /// drops below the tolerance or the iteration cap is reached.
    ///
    /// Reports the last achieved state either way.
    pub fn refine(&self, options: RefineOptions) -> Result<Refinement> {
        let mut current = self.clone();
        let mut previous_mae = current.accuracy()?.mae;
        let mut iterations = 0;
        let mut converged = false;

        for iteration in 1..=options.max_iterations {
            let new_trend = trend::fit_least_squares(&current.deseasonalized_series()?)?;
            let new_profile = seasonal::estimate(&current.series, current.method, &new_trend)?;
            current.trend = new_trend;
            current.profile = new_profile;

            let mae = current.accuracy()?.mae;
            let delta = (previous_mae - mae).abs();
            log::debug!(
                "refinement iteration {}: mae {:.4} (delta {:.4})",
                iteration,
                mae,
                delta
            );
            iterations = iteration;
            previous_mae = mae;
            if delta < options.mae_tolerance {
                converged = true;
                break;
            }
        }

        let accuracy = current.accuracy()?;
        Ok(Refinement {
            decomposition: current,
            iterations,
            converged,
            accuracy,
        })
    }

    /// Forecast `horizon` consecutive quarters following the series, with
    /// 95% interval bounds from this fit's standard error.
    pub fn forecasts(&self, horizon: usize) -> Result<Vec<Forecast>> {
        let standard_error = self.standard_error()?;
        Ok(forecast::forecast_horizon(
            &self.series,
            &self.trend,
            &self.profile,
            horizon,
            Some(standard_error),
        ))
    }
}
