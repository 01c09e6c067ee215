use crate::cubic::CubicBezier;
use crate::point::Point2D;

/// A point on a curve together with its parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplePoint {
    pub point: Point2D,
    pub t: f64,
}

/// The output of flattening a single segment.
///
/// `params` is strictly increasing, starts at 0 and ends at 1. `points[i]`
/// is the curve position at `params[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Flattened {
    pub params: Vec<f64>,
    pub points: Vec<Point2D>,
}

impl Flattened {
    /// Evaluates the curve at the given parameters, which are sorted and
    /// deduplicated first.
    pub fn from_params(curve: &CubicBezier, mut params: Vec<f64>) -> Self {
        params.sort_by(f64::total_cmp);
        params.dedup();
        let points = params.iter().map(|&t| curve.evaluate(t)).collect();

        Flattened { params, points }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of points strictly between the two ends.
    pub fn interior_count(&self) -> usize {
        self.len().saturating_sub(2)
    }

    pub fn iter(&self) -> impl Iterator<Item = SamplePoint> + '_ {
        self.params
            .iter()
            .zip(self.points.iter())
            .map(|(&t, &point)| SamplePoint { point, t })
    }

    /// Drops the end point, for chaining with the next segment.
    pub fn pop_end(&mut self) -> Option<SamplePoint> {
        let t = self.params.pop()?;
        let point = self.points.pop()?;
        Some(SamplePoint { point, t })
    }
}
