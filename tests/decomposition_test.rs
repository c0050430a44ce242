//! End-to-end tests on the 2018-2021 quarterly sales scenario.

use quartal::{
    centered_moving_average, evaluate_all_methods, fit_least_squares, fit_semi_average,
    Decomposition, Quarter, RefineOptions, SalesSeries, SeasonalMethod, PRODUCT_TOLERANCE,
};

const SALES: [f64; 16] = [
    5030.0, 6030.0, 7030.0, 5780.0, 5280.0, 6780.0, 7530.0, 6530.0, 5530.0, 7280.0, 8530.0,
    7030.0, 6280.0, 8280.0, 9280.0, 7780.0,
];

fn reference_series() -> SalesSeries {
    SalesSeries::from_values(2018, &SALES).unwrap()
}

#[test]
fn test_least_squares_reference_coefficients() {
    let trend = fit_least_squares(&reference_series()).unwrap();
    assert!((trend.slope - 3025.0 / 17.0).abs() < 1e-9);
    assert!((trend.intercept - 5361.25).abs() < 1e-9);
    assert!((trend.value_at(17.0) - 8386.25).abs() < 1e-9);
}

#[test]
fn test_semi_average_reference_coefficients() {
    let trend = fit_semi_average(&reference_series()).unwrap();
    assert!((trend.slope - 156.25).abs() < 1e-9);
    assert!((trend.intercept - 5545.625).abs() < 1e-9);
}

#[test]
fn test_moving_average_reference_values() {
    let smoothed = centered_moving_average(&reference_series());
    assert_eq!(smoothed[1].mm4, Some(5967.5));
    assert_eq!(smoothed[1].mmc4, Some(5998.75));
    assert_eq!(smoothed[12].mmc4, Some(7811.25));
    // Boundary holes.
    assert!(smoothed[0].mm4.is_none());
    assert!(smoothed[0].mmc4.is_none());
    assert!(smoothed[13].mmc4.is_none());
    assert!(smoothed[14].mmc4.is_none());
    assert!(smoothed[15].mmc4.is_none());
}

#[test]
fn test_simple_averages_reference_indices() {
    let series = reference_series();
    let trend = fit_least_squares(&series).unwrap();
    let profile = quartal::estimate(&series, SeasonalMethod::SimpleAverages, &trend).unwrap();
    let expected = [
        0.847233702926,
        1.053179480847,
        1.171526704792,
        0.956626031172,
    ];
    for (actual, expected) in profile.indices().iter().zip(expected.iter()) {
        assert!((actual - expected).abs() < 1e-9);
    }
    assert!((profile.raw_product() - 0.972360882054).abs() < 1e-9);
    assert!((profile.correction_factor() - 1.007031673329).abs() < 1e-9);
    assert!((profile.product() - 1.0).abs() < PRODUCT_TOLERANCE);
}

#[test]
fn test_ratio_to_moving_average_reference_indices() {
    let series = reference_series();
    let trend = fit_least_squares(&series).unwrap();
    let profile =
        quartal::estimate(&series, SeasonalMethod::RatioToMovingAverage, &trend).unwrap();
    let expected = [
        0.831716627456,
        1.052722493966,
        1.183743475454,
        0.964835145909,
    ];
    for (actual, expected) in profile.indices().iter().zip(expected.iter()) {
        assert!((actual - expected).abs() < 1e-9);
    }
    assert!((profile.product() - 1.0).abs() < PRODUCT_TOLERANCE);
}

#[test]
fn test_reference_accuracy_metrics() {
    let decomposition =
        Decomposition::fit(reference_series(), SeasonalMethod::SimpleAverages).unwrap();
    let accuracy = decomposition.accuracy().unwrap();
    assert!((accuracy.bias - 59.020628076).abs() < 1e-6);
    assert!((accuracy.mae - 125.059940194).abs() < 1e-6);
    assert!((accuracy.mse - 28923.393106359).abs() < 1e-4);
    assert!((accuracy.rmse - 170.068789336).abs() < 1e-6);
    assert_eq!(accuracy.rmse, accuracy.mse.sqrt());

    let se = decomposition.standard_error().unwrap();
    assert!((se - 181.811183394).abs() < 1e-6);
}

#[test]
fn test_deseasonalization_round_trip() {
    let decomposition =
        Decomposition::fit(reference_series(), SeasonalMethod::SimpleAverages).unwrap();
    let cvs = decomposition.deseasonalized();
    // t=3 (Q3, sales 7030)
    assert!((cvs[2] - 6000.716817844).abs() < 1e-6);
    for (value, obs) in cvs.iter().zip(decomposition.series().iter()) {
        let back = value * decomposition.profile().index(obs.quarter);
        assert!((back - obs.value).abs() < 1e-9);
    }
}

#[test]
fn test_estimated_points_consistency() {
    let decomposition =
        Decomposition::fit(reference_series(), SeasonalMethod::SimpleAverages).unwrap();
    let points = decomposition.estimated_points();
    assert_eq!(points.len(), 16);
    for point in &points {
        assert_eq!(point.estimated, point.trend * point.seasonal);
        assert!((point.residual_ratio * point.estimated - point.sales).abs() < 1e-9);
    }
    assert_eq!(points[0].year, 2018);
    assert_eq!(points[15].year, 2021);
    assert_eq!(points[15].quarter, Quarter::Q4);
}

#[test]
fn test_reestimated_trend_reference() {
    let decomposition =
        Decomposition::fit(reference_series(), SeasonalMethod::SimpleAverages).unwrap();
    let reestimated = decomposition.reestimate().unwrap();
    assert!((reestimated.trend().slope - 158.054788561).abs() < 1e-6);
    assert!((reestimated.trend().intercept - 5470.673416444).abs() < 1e-6);

    let comparison = decomposition.compare_reestimated().unwrap();
    assert!((comparison.reestimated.mae - 113.657920231).abs() < 1e-6);
    assert!((comparison.reestimated.bias - (-2.125931826)).abs() < 1e-6);
    assert!(comparison.reestimation_improves());
}

#[test]
fn test_refinement_converges_on_reference() {
    let decomposition =
        Decomposition::fit(reference_series(), SeasonalMethod::SimpleAverages).unwrap();
    let refinement = decomposition.refine(RefineOptions::default()).unwrap();
    assert!(refinement.converged);
    assert_eq!(refinement.iterations, 4);
    assert!((refinement.accuracy.mae - 108.916714).abs() < 1e-3);
    let product = refinement.decomposition.profile().product();
    assert!((product - 1.0).abs() < PRODUCT_TOLERANCE);
}

#[test]
fn test_method_comparison_table() {
    let series = reference_series();
    let trend = fit_least_squares(&series).unwrap();
    let evaluations = evaluate_all_methods(&series, &trend).unwrap();
    assert_eq!(evaluations.len(), 3);
    // The two trend-ratio methods are numerically identical.
    assert_eq!(
        evaluations[0].profile.indices(),
        evaluations[1].profile.indices()
    );
    assert_eq!(evaluations[0].accuracy, evaluations[1].accuracy);
    // Ratio-to-moving-average fits this series worse than the trend-ratio
    // methods.
    assert!((evaluations[2].accuracy.mae - 142.643339).abs() < 1e-5);
    assert!(evaluations[2].accuracy.mae > evaluations[0].accuracy.mae);
}

#[test]
fn test_semi_average_trend_pairs_with_profile() {
    let series = reference_series();
    let least_squares = fit_least_squares(&series).unwrap();
    let semi_average = fit_semi_average(&series).unwrap();
    let profile =
        quartal::estimate(&series, SeasonalMethod::SimpleAverages, &least_squares).unwrap();

    let decomposition = Decomposition::from_parts(
        series,
        SeasonalMethod::SimpleAverages,
        semi_average,
        profile,
    );
    let points = decomposition.estimated_points();
    assert!((points[0].trend - (5545.625 + 156.25)).abs() < 1e-9);
    for point in &points {
        assert_eq!(point.estimated, point.trend * point.seasonal);
    }
}

#[test]
fn test_percentage_equivalents() {
    let series = reference_series();
    let trend = fit_least_squares(&series).unwrap();
    let profile = quartal::estimate(&series, SeasonalMethod::SimpleAverages, &trend).unwrap();
    let percentages = profile.percentages();
    assert!((percentages[0] - (-15.2766297074)).abs() < 1e-6);
    assert!((percentages[2] - 17.1526704792).abs() < 1e-6);
}
