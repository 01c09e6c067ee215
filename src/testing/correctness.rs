use std::fs::File;

use crate::config::{FlattenConfig, FlattenStrategy};
use crate::flatness::chord_deviation;
use crate::flattened::Flattened;
use crate::testing::table::{get_flatten_output, print_first_row_md, print_row_md};
use crate::testing::{generate_bezier_curves, generate_degenerate_curves, max_deviation, s_curve, TOLERANCES};
use crate::{flatten, CubicBezier};

fn check_params(curve: &CubicBezier, result: &Flattened) {
    assert!(result.len() >= 2, "{curve:?}");
    assert_eq!(result.params.len(), result.points.len());
    assert_eq!(result.params[0], 0.0);
    assert_eq!(*result.params.last().unwrap(), 1.0);
    for pair in result.params.windows(2) {
        assert!(pair[0] < pair[1], "{curve:?}: {:?}", result.params);
    }
    assert_eq!(result.points[0], curve.p0());
    assert_eq!(*result.points.last().unwrap(), curve.p1());
}

/// Distance from the curve at the parameter midpoint of each edge to the
/// line through the edge.
fn max_midpoint_deviation(curve: &CubicBezier, result: &Flattened) -> f64 {
    let mut max: f64 = 0.0;
    for (params, points) in result.params.windows(2).zip(result.points.windows(2)) {
        let mid = curve.evaluate((params[0] + params[1]) * 0.5);
        max = max.max(chord_deviation(points[0], points[1], mid));
    }

    max
}

#[test]
fn midpoints_are_within_tolerance() {
    for strategy in FlattenStrategy::ALL {
        for &tolerance in &TOLERANCES {
            let config = FlattenConfig::new(tolerance, strategy);
            for curve in generate_bezier_curves() {
                let result = flatten(&curve, &config).unwrap();
                check_params(&curve, &result);

                let deviation = max_midpoint_deviation(&curve, &result);
                assert!(
                    deviation <= tolerance + 1e-6,
                    "{strategy} at {tolerance}: {deviation} for {curve:?}"
                );
            }
        }
    }
}

#[test]
fn tangent_strategy_bounds_the_whole_edge() {
    // The other strategies only look at the midpoints.
    for &tolerance in &TOLERANCES {
        let config = FlattenConfig::new(tolerance, FlattenStrategy::TangentExtremum);
        for curve in generate_bezier_curves() {
            let result = flatten(&curve, &config).unwrap();
            let deviation = max_deviation(&curve, &result, 32);
            assert!(deviation <= tolerance + 1e-6, "{tolerance}: {deviation} for {curve:?}");
        }
    }
}

#[test]
fn edges_are_not_longer_than_the_max_distance() {
    for strategy in FlattenStrategy::ALL {
        let config = FlattenConfig::new(0.5, strategy).with_max_dist_between_points(7.0);
        for curve in generate_bezier_curves().into_iter().chain(generate_degenerate_curves()) {
            let result = flatten(&curve, &config).unwrap();
            check_params(&curve, &result);
            for pair in result.points.windows(2) {
                assert!(pair[0].distance_to(pair[1]) <= 7.0 + 1e-9, "{strategy}: {curve:?}");
            }
        }
    }
}

#[test]
fn degenerate_curves_are_a_single_edge() {
    for strategy in FlattenStrategy::ALL {
        for curve in generate_degenerate_curves() {
            let result = flatten(&curve, &FlattenConfig::new(0.1, strategy)).unwrap();
            assert_eq!(result.params, vec![0.0, 1.0], "{strategy}: {curve:?}");
            assert_eq!(result.points, vec![curve.p0(), curve.p1()]);
        }
    }
}

#[test]
fn straight_segments_respect_the_division_limit() {
    let line = CubicBezier::line(crate::point(0.0, 0.0), crate::point(100.0, 0.0));
    for strategy in FlattenStrategy::ALL {
        let config = FlattenConfig::new(0.5, strategy).with_max_dist_between_points(1e-4);
        let result = flatten(&line, &config).unwrap();
        check_params(&line, &result);
        assert_eq!(result.len(), config.max_divisions as usize + 1, "{strategy}");
    }
}

#[test]
fn s_curve_regression() {
    let curve = s_curve();

    let config = FlattenConfig::new(2.0, FlattenStrategy::EqualSubdivision);
    let result = flatten(&curve, &config).unwrap();
    assert_eq!(result.interior_count(), 2);
    assert_eq!(result.len(), 4);

    let config = FlattenConfig::new(4.0, FlattenStrategy::EqualSubdivision);
    let result = flatten(&curve, &config).unwrap();
    assert_eq!(result.interior_count(), 0);
    assert_eq!(result.points, vec![curve.p0(), curve.p1()]);
}

#[test]
fn edge_count() {
    let _ = env_logger::builder().is_test(true).try_init();

    let curves = generate_bezier_curves();
    let mut rows = Vec::new();
    for strategy in FlattenStrategy::ALL {
        let mut counts = Vec::new();
        let mut errors = Vec::new();
        for &tolerance in &TOLERANCES {
            let config = FlattenConfig::new(tolerance, strategy);
            let mut count = 0;
            let mut error: f64 = 0.0;
            for curve in &curves {
                let result = flatten(curve, &config).unwrap();
                count += result.len() - 1;
                error = error.max(max_deviation(curve, &result, 16) / tolerance);
            }
            counts.push(count as f64);
            errors.push(error);
        }

        // Tighter tolerances never need fewer edges.
        for pair in counts.windows(2) {
            assert!(pair[0] >= pair[1], "{strategy}: {counts:?}");
        }

        rows.push((strategy, counts, errors));
    }

    if let Some(name) = get_flatten_output() {
        let mut output = File::create(name).unwrap();
        print_first_row_md(&mut output).unwrap();
        for (strategy, counts, _) in &rows {
            print_row_md(&mut output, &format!("{strategy} edges"), counts).unwrap();
        }
        for (strategy, _, errors) in &rows {
            print_row_md(&mut output, &format!("{strategy} error / tolerance"), errors).unwrap();
        }
    }
}
