use crate::algorithms::straight::break_straight_line;
use crate::config::FlattenConfig;
use crate::cubic::CubicBezier;
use crate::flatness::is_flat;
use crate::flattened::Flattened;
use crate::point::Point2D;

struct Interval {
    t0: f64,
    t1: f64,
    from: Point2D,
    to: Point2D,
    depth: u32,
}

/// Recursively splits the curve at the parameter midpoint of every interval
/// whose midpoint sample is too far from the chord.
///
/// The curve is always checked at both halves first: the midpoint of an
/// inflected curve can sit right on its chord. Only if neither half needs
/// splitting is the curve tested as a whole.
pub fn flatten_cubic(curve: &CubicBezier, config: &FlattenConfig) -> Flattened {
    if curve.is_straight() {
        return break_straight_line(curve, config);
    }

    let from = curve.p0();
    let to = curve.p1();
    let mid = curve.evaluate(0.5);

    let mut params = vec![0.0, 0.5, 1.0];
    let halves = vec![
        Interval { t0: 0.0, t1: 0.5, from, to: mid, depth: 1 },
        Interval { t0: 0.5, t1: 1.0, from: mid, to, depth: 1 },
    ];

    if subdivide(curve, config, &mut params, halves) == 0 {
        params = vec![0.0, 1.0];
        let whole = vec![Interval { t0: 0.0, t1: 1.0, from, to, depth: 0 }];
        subdivide(curve, config, &mut params, whole);
    }

    Flattened::from_params(curve, params)
}

/// Returns the number of inserted parameters.
fn subdivide(
    curve: &CubicBezier,
    config: &FlattenConfig,
    params: &mut Vec<f64>,
    mut pending: Vec<Interval>,
) -> usize {
    let mut splits = 0;
    let mut capped = false;

    while let Some(interval) = pending.pop() {
        let t = (interval.t0 + interval.t1) * 0.5;
        let p = curve.evaluate(t);

        if is_flat(config, interval.from, interval.to, p) {
            continue;
        }

        if interval.depth >= config.max_depth {
            capped = true;
            continue;
        }

        params.push(t);
        splits += 1;

        let depth = interval.depth + 1;
        pending.push(Interval { t0: interval.t0, t1: t, from: interval.from, to: p, depth });
        pending.push(Interval { t0: t, t1: interval.t1, from: p, to: interval.to, depth });
    }

    if capped {
        log::warn!("midpoint bisection reached the depth limit ({}), result exceeds the tolerance", config.max_depth);
    }

    splits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlattenStrategy;
    use crate::point::point;
    use crate::testing::s_curve;

    fn config(max_error: f64) -> FlattenConfig {
        FlattenConfig::new(max_error, FlattenStrategy::MidpointBisection)
    }

    #[test]
    fn s_curve_regression() {
        let result = flatten_cubic(&s_curve(), &config(2.0));
        assert_eq!(result.params, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let result = flatten_cubic(&s_curve(), &config(4.0));
        assert_eq!(result.params, vec![0.0, 1.0]);
    }

    #[test]
    fn arch_is_split_once_at_the_top() {
        // Both halves are flat enough but the whole arch is not.
        let arch = CubicBezier::new(point(0.0, 0.0), point(0.0, 4.0), point(10.0, 4.0), point(10.0, 0.0));
        let result = flatten_cubic(&arch, &config(2.0));
        assert_eq!(result.params, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn depth_limit() {
        let config = FlattenConfig { max_depth: 2, ..config(1e-9) };
        let result = flatten_cubic(&s_curve(), &config);
        // 0.5 is inserted up front, then two more levels.
        assert!(result.len() <= 9);
        assert_eq!(result.params.first(), Some(&0.0));
        assert_eq!(result.params.last(), Some(&1.0));
    }

    #[test]
    fn loop_with_coincident_anchors() {
        let curve = CubicBezier::new(point(0.0, 0.0), point(100.0, 100.0), point(-100.0, 100.0), point(0.0, 0.0));
        let result = flatten_cubic(&curve, &config(0.5));
        assert!(result.len() > 4);
        assert_eq!(result.points.first(), result.points.last());
    }
}
