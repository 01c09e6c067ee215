use crate::config::FlattenConfig;
use crate::cubic::CubicBezier;
use crate::flattened::Flattened;

/// Flattens a segment whose handles sit on its anchors.
///
/// Without a maximum edge length the result is the two anchors. Otherwise
/// the chord is divided into `ceil(length / max_dist)` equal pieces, at most
/// `max_divisions` of them. The points are exact linear interpolations of
/// the anchors and the reported parameters map back onto them.
pub fn break_straight_line(curve: &CubicBezier, config: &FlattenConfig) -> Flattened {
    let from = curve.p0();
    let to = curve.p1();

    let mut params = vec![0.0];
    let mut points = vec![from];

    if config.has_max_dist() {
        let n = piece_count(from.distance_to(to), config);
        for i in 1..n {
            let s = i as f64 / n as f64;
            params.push(CubicBezier::straight_parameter(s));
            points.push(from.lerp(to, s));
        }
    }

    params.push(1.0);
    points.push(to);

    Flattened { params, points }
}

fn piece_count(length: f64, config: &FlattenConfig) -> u32 {
    let pieces = (length / config.max_dist_between_points).ceil();
    if pieces > config.max_divisions as f64 {
        log::warn!(
            "straight segment reached the division limit ({}), edges exceed the max distance",
            config.max_divisions
        );
        return config.max_divisions;
    }

    (pieces as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::point;
    use approx::assert_relative_eq;

    fn config(max_dist: f64) -> FlattenConfig {
        FlattenConfig::default().with_max_dist_between_points(max_dist)
    }

    #[test]
    fn no_max_dist() {
        let line = CubicBezier::line(point(0.0, 0.0), point(100.0, 0.0));
        let result = break_straight_line(&line, &config(0.0));
        assert_eq!(result.params, vec![0.0, 1.0]);
        assert_eq!(result.points, vec![point(0.0, 0.0), point(100.0, 0.0)]);
    }

    #[test]
    fn divided_by_max_dist() {
        let line = CubicBezier::line(point(0.0, 0.0), point(100.0, 0.0));
        let result = break_straight_line(&line, &config(30.0));
        assert_eq!(result.len(), 5);
        for (i, p) in result.points.iter().enumerate() {
            assert_relative_eq!(p.x, 25.0 * i as f64, epsilon = 1e-9);
            assert_relative_eq!(line.evaluate(result.params[i]).x, p.x, epsilon = 1e-9);
        }

        // Short enough already.
        let result = break_straight_line(&line, &config(100.0));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn single_point() {
        let dot = CubicBezier::line(point(7.0, 7.0), point(7.0, 7.0));
        for max_dist in [0.0, 1.0] {
            let result = break_straight_line(&dot, &config(max_dist));
            assert_eq!(result.params, vec![0.0, 1.0]);
            assert_eq!(result.points, vec![point(7.0, 7.0), point(7.0, 7.0)]);
        }
    }

    #[test]
    fn division_limit() {
        let line = CubicBezier::line(point(0.0, 0.0), point(100.0, 0.0));
        let capped = FlattenConfig { max_divisions: 8, ..config(1e-12) };
        let result = break_straight_line(&line, &capped);
        assert_eq!(result.len(), 9);
        assert_relative_eq!(result.points[1].x, 12.5, epsilon = 1e-9);

        let result = break_straight_line(&line, &config(1e-4));
        assert_eq!(result.len(), FlattenConfig::default().max_divisions as usize + 1);
        assert_eq!(result.params.last(), Some(&1.0));
    }
}
