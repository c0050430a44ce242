//! # Quartal
//!
//! Multiplicative seasonal decomposition and forecasting for quarterly
//! sales series: `Yt = Tt * St * et`.
//!
//! The engine decomposes an observed series into a linear trend, a
//! normalized per-quarter seasonal profile and residual ratios, evaluates
//! three alternative seasonal-index estimators, re-estimates the trend on
//! the deseasonalized (CVS) series, scores every fit with standard
//! accuracy metrics, and extrapolates point forecasts with 95% confidence
//! intervals.
//!
//! All computation is synchronous, deterministic and free of hidden
//! state; derived values are pure functions of their inputs, recomputed
//! per call.
//!
//! ```
//! use quartal::{Decomposition, SalesSeries, SeasonalMethod};
//!
//! let series = SalesSeries::from_values(
//!     2018,
//!     &[
//!         5030.0, 6030.0, 7030.0, 5780.0, 5280.0, 6780.0, 7530.0, 6530.0,
//!         5530.0, 7280.0, 8530.0, 7030.0, 6280.0, 8280.0, 9280.0, 7780.0,
//!     ],
//! )
//! .unwrap();
//! let decomposition =
//!     Decomposition::fit(series, SeasonalMethod::RatioToMovingAverage).unwrap();
//! let forecasts = decomposition.forecasts(4).unwrap();
//! assert_eq!(forecasts.len(), 4);
//! ```

pub mod decomposition;
pub mod error;
pub mod forecast;
pub mod io;
pub mod metrics;
pub mod seasonal;
pub mod series;
pub mod smoothing;
pub mod trend;

// Re-export commonly used types
pub use decomposition::{
    Decomposition, EstimatedPoint, ModelComparison, Refinement, RefineOptions,
};
pub use error::{Error, Result};
pub use forecast::{
    forecast_at, forecast_horizon, standard_error_of_estimate, Forecast, CRITICAL_VALUE_95,
};
pub use metrics::AccuracyMetrics;
pub use seasonal::{
    estimate, evaluate_all_methods, MethodEvaluation, SeasonalMethod, SeasonalProfile,
    PRODUCT_TOLERANCE,
};
pub use series::{Observation, Quarter, SalesSeries};
pub use smoothing::{centered_moving_average, SmoothedPoint};
pub use trend::{fit_least_squares, fit_semi_average, TrendModel};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
