use crate::algorithms::straight::break_straight_line;
use crate::config::FlattenConfig;
use crate::cubic::CubicBezier;
use crate::flatness::chord_deviation;
use crate::flattened::Flattened;

/// Splits the curve where it is farthest from its chord, found analytically
/// as the point where the tangent is parallel to the chord, until every
/// piece is within tolerance.
pub fn flatten_cubic(curve: &CubicBezier, config: &FlattenConfig) -> Flattened {
    if curve.is_straight() {
        return break_straight_line(curve, config);
    }

    let mut params = vec![0.0, 1.0];
    let mut pending = vec![(0.0, 1.0, 0)];
    let mut capped = false;

    while let Some((t0, t1, depth)) = pending.pop() {
        let Some(t) = split_parameter(curve, config, t0, t1) else {
            continue;
        };

        if depth >= config.max_depth {
            capped = true;
            continue;
        }

        params.push(t);
        pending.push((t0, t, depth + 1));
        pending.push((t, t1, depth + 1));
    }

    if capped {
        log::warn!("tangent subdivision reached the depth limit ({}), result exceeds the tolerance", config.max_depth);
    }

    Flattened::from_params(curve, params)
}

/// The parameter at which `[t0, t1]` has to be split, if any.
fn split_parameter(curve: &CubicBezier, config: &FlattenConfig, t0: f64, t1: f64) -> Option<f64> {
    let from = curve.evaluate(t0);
    let to = curve.evaluate(t1);

    let extremum = if from == to {
        // Without a chord direction, fall back to the midpoint.
        let t = (t0 + t1) * 0.5;
        Some((from.distance_to(curve.evaluate(t)), t))
    } else {
        farthest_tangent_point(curve, t0, t1)
    };

    match extremum {
        Some((deviation, t)) if deviation > config.max_error => Some(t),
        _ if config.too_long(from.square_distance_to(to)) => Some((t0 + t1) * 0.5),
        _ => None,
    }
}

/// Deviation and parameter of the farthest point from the chord of
/// `[t0, t1]` where the tangent is parallel to the chord.
fn farthest_tangent_point(curve: &CubicBezier, t0: f64, t1: f64) -> Option<(f64, f64)> {
    let from = curve.evaluate(t0);
    let to = curve.evaluate(t1);

    let split;
    let part = if t0 == 0.0 && t1 == 1.0 {
        curve
    } else {
        split = curve.split_at(t0, t1);
        &split
    };

    let mut farthest: Option<(f64, f64)> = None;
    for s in part.chord_tangent_parameters() {
        let t = t0 + (t1 - t0) * s;
        let deviation = chord_deviation(from, to, curve.evaluate(t));
        if farthest.map_or(true, |(best, _)| deviation > best) {
            farthest = Some((deviation, t));
        }
    }

    farthest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlattenStrategy;
    use crate::point::point;
    use crate::testing::s_curve;
    use approx::assert_relative_eq;

    fn config(max_error: f64) -> FlattenConfig {
        FlattenConfig::new(max_error, FlattenStrategy::TangentExtremum)
    }

    #[test]
    fn s_curve_regression() {
        let result = flatten_cubic(&s_curve(), &config(2.0));
        assert_eq!(result.len(), 4);

        let result = flatten_cubic(&s_curve(), &config(4.0));
        assert_eq!(result.params, vec![0.0, 1.0]);
    }

    #[test]
    fn arch_is_split_at_its_top() {
        let arch = CubicBezier::new(point(0.0, 0.0), point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0));
        let (deviation, t) = farthest_tangent_point(&arch, 0.0, 1.0).unwrap();
        assert_relative_eq!(t, 0.5);
        assert_relative_eq!(deviation, 7.5);

        let result = flatten_cubic(&arch, &config(8.0));
        assert_eq!(result.len(), 2);
        let result = flatten_cubic(&arch, &config(7.0));
        assert!(result.params.contains(&0.5));
    }

    #[test]
    fn max_dist_splits_flat_pieces() {
        let curve = s_curve();
        let config = config(100.0).with_max_dist_between_points(50.0);
        let result = flatten_cubic(&curve, &config);
        for pair in result.points.windows(2) {
            assert!(pair[0].distance_to(pair[1]) <= 50.0);
        }
    }

    #[test]
    fn coincident_anchors() {
        let curve = CubicBezier::new(point(0.0, 0.0), point(100.0, 100.0), point(-100.0, 100.0), point(0.0, 0.0));
        let result = flatten_cubic(&curve, &config(0.5));
        assert!(result.len() > 3);
        assert!(result.params.contains(&0.5));
    }
}
