use crate::config::FlattenConfig;
use crate::point::Point2D;

/// A straight line in normalized implicit form `a x + b y + c = 0`
/// with `a^2 + b^2 = 1`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    /// The line through two points, or `None` if they coincide.
    pub fn through(from: Point2D, to: Point2D) -> Option<Line> {
        let v = to - from;
        let len = v.length();
        if len == 0.0 {
            return None;
        }

        let a = -v.y / len;
        let b = v.x / len;
        Some(Line { a, b, c: -(a * from.x + b * from.y) })
    }

    /// Perpendicular distance from `p` to the line.
    #[inline]
    pub fn distance_to_point(&self, p: Point2D) -> f64 {
        (self.a * p.x + self.b * p.y + self.c).abs()
    }
}

/// Distance from `p` to the line through the chord `from -> to`.
///
/// A chord with coincident ends measures the distance to that point.
#[inline]
pub fn chord_deviation(from: Point2D, to: Point2D, p: Point2D) -> f64 {
    match Line::through(from, to) {
        Some(line) => line.distance_to_point(p),
        None => from.distance_to(p),
    }
}

/// Whether the polyline edge `from -> to` may stand for a piece of curve
/// that deviates from it by `deviation`.
#[inline]
pub fn edge_is_acceptable(config: &FlattenConfig, from: Point2D, to: Point2D, deviation: f64) -> bool {
    deviation <= config.max_error && !config.too_long(from.square_distance_to(to))
}

/// Whether the midpoint sample `mid` of a piece of curve is within tolerance
/// of the chord `from -> to`, and the chord is short enough.
#[inline]
pub fn is_flat(config: &FlattenConfig, from: Point2D, to: Point2D, mid: Point2D) -> bool {
    edge_is_acceptable(config, from, to, chord_deviation(from, to, mid))
}
