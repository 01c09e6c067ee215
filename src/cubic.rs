use std::cell::OnceCell;
use std::f64::consts::FRAC_PI_2;

use arrayvec::ArrayVec;

use crate::config::{ArcLengthConfig, NearestPointConfig};
use crate::point::{point, Point2D};
use crate::util::{simpson, solve_quadratic};

/// Roots this close outside of `[0, 1]` are still reported by the tangent
/// queries, clamped to the range.
const PARAM_EPSILON: f64 = 0.00001;

/// Smallest step of the coarse scan of the nearest point search.
const MIN_SCAN_STEP: f64 = 1.0 / 65536.0;

/// Power form `a0 + a1 t + a2 t^2 + a3 t^3` of a cubic bézier curve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicPolynomial {
    pub a0: Point2D,
    pub a1: Point2D,
    pub a2: Point2D,
    pub a3: Point2D,
}

impl CubicPolynomial {
    #[inline]
    pub fn sample(&self, t: f64) -> Point2D {
        // Horner's method.
        ((self.a3 * t + self.a2) * t + self.a1) * t + self.a0
    }

    #[inline]
    pub fn derivative(&self, t: f64) -> Point2D {
        (self.a3 * (3.0 * t) + self.a2 * 2.0) * t + self.a1
    }
}

/// The nearest point of a curve to some position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NearestPoint {
    pub t: f64,
    pub point: Point2D,
    pub distance: f64,
}

/// A cubic bézier segment.
///
/// `p0` and `p1` are the anchors, `c0` the handle leaving `p0` and `c1` the
/// handle arriving at `p1`. The control points cannot be modified after
/// construction since the total length is memoized on first use.
#[derive(Clone, Debug)]
pub struct CubicBezier {
    p0: Point2D,
    c0: Point2D,
    c1: Point2D,
    p1: Point2D,
    length_coefficients: [f64; 5],
    arc_length_config: ArcLengthConfig,
    total_length: OnceCell<f64>,
}

impl PartialEq for CubicBezier {
    fn eq(&self, other: &Self) -> bool {
        self.points() == other.points()
    }
}

impl CubicBezier {
    pub fn new(p0: Point2D, c0: Point2D, c1: Point2D, p1: Point2D) -> Self {
        CubicBezier {
            p0,
            c0,
            c1,
            p1,
            length_coefficients: length_coefficients(p0, c0, c1, p1),
            arc_length_config: ArcLengthConfig::default(),
            total_length: OnceCell::new(),
        }
    }

    /// A segment with both handles on their anchors.
    pub fn line(from: Point2D, to: Point2D) -> Self {
        CubicBezier::new(from, from, to, to)
    }

    /// Uses a different integration setup for the length queries.
    pub fn with_arc_length_config(mut self, config: ArcLengthConfig) -> Self {
        if config != self.arc_length_config {
            self.arc_length_config = config;
            self.total_length = OnceCell::new();
        }
        self
    }

    #[inline]
    pub fn p0(&self) -> Point2D { self.p0 }
    #[inline]
    pub fn c0(&self) -> Point2D { self.c0 }
    #[inline]
    pub fn c1(&self) -> Point2D { self.c1 }
    #[inline]
    pub fn p1(&self) -> Point2D { self.p1 }

    pub fn points(&self) -> [Point2D; 4] {
        [self.p0, self.c0, self.c1, self.p1]
    }

    pub fn arc_length_config(&self) -> &ArcLengthConfig {
        &self.arc_length_config
    }

    /// Position at parameter `t`.
    ///
    /// Values outside of `[0, 1]` extrapolate the cubic polynomial.
    #[inline]
    pub fn evaluate(&self, t: f64) -> Point2D {
        let u = 1.0 - t;
        let (p0, c0, c1, p1) = (self.p0, self.c0, self.c1, self.p1);
        point(
            u * u * u * p0.x + 3.0 * u * t * (u * c0.x + t * c1.x) + t * t * t * p1.x,
            u * u * u * p0.y + 3.0 * u * t * (u * c0.y + t * c1.y) + t * t * t * p1.y,
        )
    }

    /// Derivative vector `B'(t)`.
    pub fn derivative(&self, t: f64) -> Point2D {
        let u = 1.0 - t;
        ((self.c0 - self.p0) * (u * u) + (self.c1 - self.c0) * (2.0 * u * t) + (self.p1 - self.c1) * (t * t)) * 3.0
    }

    pub fn polynomial(&self) -> CubicPolynomial {
        let (p0, c0, c1, p1) = (self.p0, self.c0, self.c1, self.p1);
        CubicPolynomial {
            a0: p0,
            a1: (c0 - p0) * 3.0,
            a2: (p0 - c0 * 2.0 + c1) * 3.0,
            a3: p1 - p0 + (c0 - c1) * 3.0,
        }
    }

    /// True if both handles sit exactly on their anchors.
    ///
    /// Exact comparison: handles are collapsed programmatically by hosts,
    /// nearly straight curves are flattened like any other curve.
    #[inline]
    pub fn is_straight(&self) -> bool {
        self.p0 == self.c0 && self.p1 == self.c1
    }

    /// True if the whole segment is a single point.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.is_straight() && self.p0 == self.p1
    }

    /// Coefficients of `|B'(t)|^2 / 9` as a quartic polynomial, highest
    /// degree first.
    pub fn length_coefficients(&self) -> [f64; 5] {
        self.length_coefficients
    }

    /// Length of the curve between parameters 0 and `t`.
    pub fn arc_length(&self, t: f64) -> f64 {
        let [k0, k1, k2, k3, k4] = self.length_coefficients;
        let speed = |u: f64| {
            // Rounding can make the polynomial slightly negative where the
            // derivative vanishes.
            (u * (u * (u * (u * k0 + k1) + k2) + k3) + k4).max(0.0).sqrt()
        };

        // The polynomial is |B'|^2 / 9.
        3.0 * simpson(speed, t, self.arc_length_config.subdivisions)
    }

    /// Length of the whole segment, computed once.
    pub fn total_length(&self) -> f64 {
        *self.total_length.get_or_init(|| self.arc_length(1.0))
    }

    /// Parameter at which the arc length from the start reaches `len`.
    ///
    /// Returns 0 for non-positive lengths and 1 for lengths past the end.
    /// If the bisection does not get within the configured tolerance in
    /// time, the last midpoint is returned.
    pub fn parameter_at_length(&self, len: f64) -> f64 {
        if len <= 0.0 {
            return 0.0;
        }
        let total = self.total_length();
        if len > total {
            return 1.0;
        }

        let config = &self.arc_length_config;
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        let mut t = 0.5;
        for _ in 0..config.max_iterations {
            t = t0 + (t1 - t0) * 0.5;
            let d = len - self.arc_length(t);
            if d.abs() < config.tolerance {
                return t;
            }
            if d < 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
        }

        log::debug!(
            "inverse arc length did not converge after {} iterations (len = {len}, total = {total}, t = {t})",
            config.max_iterations,
        );

        t.clamp(0.0, 1.0)
    }

    pub fn point_at_length(&self, len: f64) -> Point2D {
        self.evaluate(self.parameter_at_length(len))
    }

    /// Direction of the tangent at `t` in radians.
    ///
    /// Where the derivative vanishes (the ends of a straight segment) the
    /// direction of the chord is used instead.
    pub fn tangent_angle(&self, t: f64) -> f64 {
        let mut d = self.derivative(t);
        if d.square_length() == 0.0 {
            d = self.p1 - self.p0;
        }
        if d.square_length() == 0.0 {
            return 0.0;
        }

        if d.x.abs() <= f64::EPSILON * d.y.abs() {
            return if d.y < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 };
        }

        d.y.atan2(d.x)
    }

    /// The part of the curve between `t1` and `t2`.
    pub fn split_at(&self, t1: f64, t2: f64) -> CubicBezier {
        let from = self.evaluate(t1);
        let to = self.evaluate(t2);

        let out_rate = if t1 < 1.0 { (t2 - t1) / (1.0 - t1) } else { 0.0 };
        let in_rate = if t2 > 0.0 { (t2 - t1) / t2 } else { 0.0 };

        let c0 = from + (self.after_handle_at(t1) - from) * out_rate;
        let c1 = to + (self.before_handle_at(t2) - to) * in_rate;

        CubicBezier::new(from, c0, c1, to).with_arc_length_config(self.arc_length_config)
    }

    /// The piece of the curve starting at `t` with arc length `len`, or the
    /// whole rest of the curve if it is shorter.
    pub fn sub_curve_with_length(&self, t: f64, len: f64) -> CubicBezier {
        let rest = self.split_at(t, 1.0);
        let end = rest.parameter_at_length(len);
        rest.split_at(0.0, end)
    }

    /// Incoming handle of the split point when splitting at `t`.
    fn before_handle_at(&self, t: f64) -> Point2D {
        let (p0, c0, c1) = (self.p0, self.c0, self.c1);
        (((p0 - c0 * 2.0 + c1) * t) + (c0 - p0) * 2.0) * t + p0
    }

    /// Outgoing handle of the split point when splitting at `t`.
    fn after_handle_at(&self, t: f64) -> Point2D {
        let (c0, c1, p1) = (self.c0, self.c1, self.p1);
        (((c0 - c1 * 2.0 + p1) * t) + (c1 - c0) * 2.0) * t + c0
    }

    /// Parameter of a straight segment at which the position has travelled
    /// the fraction `s` of the chord.
    ///
    /// With both handles on the anchors, `B(t) = p0 + (p1 - p0) (3t^2 - 2t^3)`,
    /// so this inverts the smoothstep polynomial. Only meaningful when
    /// [`is_straight`](Self::is_straight) is true.
    pub fn straight_parameter(s: f64) -> f64 {
        let s = s.clamp(0.0, 1.0);
        if s == 0.0 || s == 1.0 {
            return s;
        }
        0.5 - ((1.0 - 2.0 * s).asin() / 3.0).sin()
    }

    /// Parameters where the tangent is parallel to `direction`, in
    /// ascending order.
    pub fn parameters_with_direction(&self, direction: Point2D) -> ArrayVec<f64, 2> {
        let poly = self.polynomial();
        let roots = solve_quadratic(
            3.0 * poly.a3.cross(direction),
            2.0 * poly.a2.cross(direction),
            poly.a1.cross(direction),
        );

        let mut result = ArrayVec::new();
        for t in roots {
            if t >= -PARAM_EPSILON && t <= 1.0 + PARAM_EPSILON {
                result.push(t.clamp(0.0, 1.0));
            }
        }

        result
    }

    /// Parameters strictly inside the curve where the tangent is parallel to
    /// the chord. These are the points of the curve farthest from the chord
    /// on either side.
    pub fn chord_tangent_parameters(&self) -> ArrayVec<f64, 2> {
        let chord = self.p1 - self.p0;
        let mut result = ArrayVec::new();
        if chord.square_length() == 0.0 {
            return result;
        }

        let poly = self.polynomial();
        let roots = solve_quadratic(
            3.0 * poly.a3.cross(chord),
            2.0 * poly.a2.cross(chord),
            poly.a1.cross(chord),
        );
        for t in roots {
            if t > 0.0 && t < 1.0 {
                result.push(t);
            }
        }

        result
    }

    /// Finds the point of the curve closest to `p`.
    ///
    /// A coarse scan picks a starting parameter which is then refined in a
    /// shrinking window around the best candidate. The scan step is kept
    /// within `[1/65536, 1]`.
    pub fn nearest_parameter(&self, p: Point2D, config: &NearestPointConfig) -> NearestPoint {
        let poly = self.polynomial();
        let square_distance = |t: f64| poly.sample(t).square_distance_to(p);

        let step = config.initial_step.clamp(MIN_SCAN_STEP, 1.0);
        let scan_count = (1.0 / step).ceil() as u32;
        let mut best_t = 0.0;
        let mut best_d = square_distance(0.0);
        for i in 1..=scan_count {
            let t = (i as f64 * step).min(1.0);
            let d = square_distance(t);
            if d < best_d {
                best_d = d;
                best_t = t;
            }
        }

        let mut step = step;
        let mut iterations = 0;
        loop {
            let t_min = (best_t - step).max(0.0);
            let t_max = (best_t + step).min(1.0);
            if poly.sample(t_min).square_distance_to(poly.sample(t_max)) < config.tolerance {
                break;
            }

            iterations += 1;
            if iterations > config.max_iterations {
                log::warn!(
                    "nearest point search stopped after {} iterations (t = {best_t})",
                    config.max_iterations,
                );
                break;
            }

            step *= 0.5;
            let mut t = t_min;
            while t <= t_max {
                let d = square_distance(t);
                if d < best_d {
                    best_d = d;
                    best_t = t;
                }
                t += step;
            }
        }

        NearestPoint {
            t: best_t,
            point: self.evaluate(best_t),
            distance: best_d.sqrt(),
        }
    }

    pub fn to_lyon(&self) -> lyon_path::geom::CubicBezierSegment<f64> {
        lyon_path::geom::CubicBezierSegment {
            from: self.p0.into(),
            ctrl1: self.c0.into(),
            ctrl2: self.c1.into(),
            to: self.p1.into(),
        }
    }

    pub fn to_kurbo(&self) -> kurbo::CubicBez {
        kurbo::CubicBez::new(self.p0, self.c0, self.c1, self.p1)
    }
}

fn length_coefficients(p0: Point2D, c0: Point2D, c1: Point2D, p1: Point2D) -> [f64; 5] {
    // B'(t) / 3 = m t^2 + 2 n t + o
    let m = p1 - p0 + (c0 - c1) * 3.0;
    let n = p0 - c0 * 2.0 + c1;
    let o = c0 - p0;

    [
        m.dot(m),
        4.0 * m.dot(n),
        2.0 * (m.dot(o) + 2.0 * n.dot(n)),
        4.0 * n.dot(o),
        o.dot(o),
    ]
}

impl From<lyon_path::geom::CubicBezierSegment<f64>> for CubicBezier {
    fn from(c: lyon_path::geom::CubicBezierSegment<f64>) -> Self {
        CubicBezier::new(c.from.into(), c.ctrl1.into(), c.ctrl2.into(), c.to.into())
    }
}

impl From<kurbo::CubicBez> for CubicBezier {
    fn from(c: kurbo::CubicBez) -> Self {
        CubicBezier::new(c.p0.into(), c.p1.into(), c.p2.into(), c.p3.into())
    }
}
