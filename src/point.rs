use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A 2D point or vector.
///
/// The same type is used for positions and offsets, the way the path
/// geometry of a host usually stores anchors and handles as plain
/// coordinate pairs. Components are expected to be finite.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

#[inline]
pub const fn point(x: f64, y: f64) -> Point2D {
    Point2D { x, y }
}

impl Point2D {
    pub const ZERO: Point2D = point(0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    #[inline]
    pub fn add(self, other: Point2D) -> Point2D {
        point(self.x + other.x, self.y + other.y)
    }

    #[inline]
    pub fn sub(self, other: Point2D) -> Point2D {
        point(self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub fn scale(self, s: f64) -> Point2D {
        point(self.x * s, self.y * s)
    }

    /// Rotates the vector counter-clockwise around the origin.
    pub fn rotate(self, radians: f64) -> Point2D {
        let (s, c) = radians.sin_cos();
        point(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// Unit vector with the same direction, or the zero vector if the
    /// length is zero.
    pub fn normalize(self) -> Point2D {
        let len = self.length();
        if len == 0.0 {
            return Point2D::ZERO;
        }

        point(self.x / len, self.y / len)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.square_length().sqrt()
    }

    #[inline]
    pub fn square_length(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn dot(self, other: Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn cross(self, other: Point2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn distance_to(self, other: Point2D) -> f64 {
        (other - self).length()
    }

    #[inline]
    pub fn square_distance_to(self, other: Point2D) -> f64 {
        (other - self).square_length()
    }

    /// Linear interpolation, `t = 0` gives `self` and `t = 1` gives `other`.
    #[inline]
    pub fn lerp(self, other: Point2D, t: f64) -> Point2D {
        point(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Angle of the vector in radians, in `[-PI, PI]`.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl Add for Point2D {
    type Output = Point2D;
    #[inline]
    fn add(self, other: Point2D) -> Point2D {
        Point2D::add(self, other)
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    #[inline]
    fn sub(self, other: Point2D) -> Point2D {
        Point2D::sub(self, other)
    }
}

impl AddAssign for Point2D {
    #[inline]
    fn add_assign(&mut self, other: Point2D) {
        *self = *self + other;
    }
}

impl SubAssign for Point2D {
    #[inline]
    fn sub_assign(&mut self, other: Point2D) {
        *self = *self - other;
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;
    #[inline]
    fn mul(self, s: f64) -> Point2D {
        self.scale(s)
    }
}

impl Neg for Point2D {
    type Output = Point2D;
    #[inline]
    fn neg(self) -> Point2D {
        point(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(xy: [f64; 2]) -> Self {
        point(xy[0], xy[1])
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        point(x, y)
    }
}

impl From<lyon_path::geom::Point<f64>> for Point2D {
    fn from(p: lyon_path::geom::Point<f64>) -> Self {
        point(p.x, p.y)
    }
}

impl From<Point2D> for lyon_path::geom::Point<f64> {
    fn from(p: Point2D) -> Self {
        lyon_path::geom::Point::new(p.x, p.y)
    }
}

impl From<lyon_path::geom::Vector<f64>> for Point2D {
    fn from(v: lyon_path::geom::Vector<f64>) -> Self {
        point(v.x, v.y)
    }
}

impl From<Point2D> for lyon_path::geom::Vector<f64> {
    fn from(p: Point2D) -> Self {
        lyon_path::geom::Vector::new(p.x, p.y)
    }
}

impl From<kurbo::Point> for Point2D {
    fn from(p: kurbo::Point) -> Self {
        point(p.x, p.y)
    }
}

impl From<Point2D> for kurbo::Point {
    fn from(p: Point2D) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn normalize_zero_is_zero() {
        let n = Point2D::ZERO.normalize();
        assert_eq!(n, Point2D::ZERO);
        assert!(!n.x.is_nan());

        let n = point(3.0, 4.0).normalize();
        assert_relative_eq!(n.x, 0.6);
        assert_relative_eq!(n.y, 0.8);
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = point(2.0, 0.0).rotate(PI / 2.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn arithmetic() {
        let a = point(1.0, 2.0);
        let b = point(3.0, -1.0);
        assert_eq!(a + b, point(4.0, 1.0));
        assert_eq!(a - b, point(-2.0, 3.0));
        assert_eq!(a * 2.0, point(2.0, 4.0));
        assert_eq!(-a, point(-1.0, -2.0));
        assert_eq!(a.dot(b), 1.0);
        assert_eq!(a.cross(b), -7.0);
        assert_eq!(a.lerp(b, 0.5), point(2.0, 0.5));
        assert_relative_eq!(point(0.0, 0.0).distance_to(point(3.0, 4.0)), 5.0);
        assert_relative_eq!(point(0.0, -1.0).angle(), -PI / 2.0);
    }

    #[test]
    fn conversions() {
        let p = point(1.5, -2.5);
        let lyon: lyon_path::geom::Point<f64> = p.into();
        assert_eq!(Point2D::from(lyon), p);
        let k: kurbo::Point = p.into();
        assert_eq!(Point2D::from(k), p);
        assert_eq!(Point2D::from([1.5, -2.5]), p);
    }
}
