#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::config::{FlattenConfig, NearestPointConfig, SamplerConfig};
use crate::cubic::{CubicBezier, NearestPoint};
use crate::error::Result;
use crate::point::Point2D;
use crate::sampler::EquallySpacedSampler;

/// An anchor of a path with its two handles.
///
/// `handle_in` shapes the segment arriving at the anchor, `handle_out` the
/// segment leaving it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PathPoint {
    pub anchor: Point2D,
    pub handle_in: Point2D,
    pub handle_out: Point2D,
}

impl PathPoint {
    pub fn new(anchor: Point2D, handle_in: Point2D, handle_out: Point2D) -> Self {
        PathPoint { anchor, handle_in, handle_out }
    }

    /// A point with both handles on the anchor.
    pub fn corner(anchor: Point2D) -> Self {
        PathPoint { anchor, handle_in: anchor, handle_out: anchor }
    }
}

/// A point produced from a path, with the segment it lies on and its
/// parameter on that segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathSample {
    pub point: Point2D,
    pub t: f64,
    pub segment: usize,
}

/// A chain of cubic segments through a list of anchors.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BezierPath {
    pub points: Vec<PathPoint>,
    pub closed: bool,
}

impl BezierPath {
    pub fn new(points: Vec<PathPoint>, closed: bool) -> Self {
        BezierPath { points, closed }
    }

    /// A path made of straight segments.
    pub fn from_polyline<I>(points: I, closed: bool) -> Self
    where
        I: IntoIterator<Item = Point2D>,
    {
        BezierPath {
            points: points.into_iter().map(PathPoint::corner).collect(),
            closed,
        }
    }

    /// Rebuilds a path from the output of [`flatten`](Self::flatten) or
    /// [`equally_spaced_points`](Self::equally_spaced_points).
    pub fn from_samples(samples: &[PathSample], closed: bool) -> Self {
        BezierPath::from_polyline(samples.iter().map(|s| s.point), closed)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments, including the closing one of a closed path.
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// The segment leaving the `index`-th anchor.
    ///
    /// # Panics
    ///
    /// If `index` is not below [`segment_count`](Self::segment_count).
    pub fn segment(&self, index: usize) -> CubicBezier {
        assert!(index < self.segment_count());
        let from = &self.points[index];
        let to = &self.points[(index + 1) % self.points.len()];

        CubicBezier::new(from.anchor, from.handle_out, to.handle_in, to.anchor)
    }

    pub fn segments(&self) -> impl Iterator<Item = (usize, CubicBezier)> + '_ {
        (0..self.segment_count()).map(move |i| (i, self.segment(i)))
    }

    pub fn length(&self) -> f64 {
        self.segments().map(|(_, curve)| curve.total_length()).sum()
    }

    /// Flattens every segment with the configured strategy.
    ///
    /// Consecutive segments share an anchor, which is only emitted once. The
    /// end of a closed path is its first sample and is not repeated.
    pub fn flatten(&self, config: &FlattenConfig) -> Result<Vec<PathSample>> {
        config.validate()?;

        let count = self.segment_count();
        if count == 0 {
            return Ok(self.lone_anchor());
        }

        let mut result = Vec::new();
        for (segment, curve) in self.segments() {
            let mut flattened = config.strategy.flatten_unchecked(&curve, config);
            if self.closed || segment + 1 < count {
                flattened.pop_end();
            }

            log::trace!(
                "segment {segment}: {} points with {}",
                flattened.len(),
                config.strategy,
            );

            result.extend(flattened.iter().map(|s| PathSample { point: s.point, t: s.t, segment }));
        }

        Ok(result)
    }

    /// Places points at equal arc length intervals along the whole path.
    ///
    /// With [`SamplerConfig::fit_to_length`] the spacing is adjusted so that
    /// it divides the length of the path evenly. The last sample then lands
    /// on the end of an open path, and a closed path does not repeat its
    /// first sample.
    pub fn equally_spaced_points(&self, config: &SamplerConfig) -> Result<Vec<PathSample>> {
        config.validate()?;

        let curves: Vec<CubicBezier> = self
            .segments()
            .map(|(_, curve)| curve.with_arc_length_config(config.arc_length))
            .collect();

        if curves.is_empty() {
            return Ok(self.lone_anchor());
        }

        let mut spacing = config.spacing;
        if config.fit_to_length {
            let length: f64 = curves.iter().map(CubicBezier::total_length).sum();
            let n = (length / spacing).round();
            if n >= 1.0 {
                spacing = length / n;
            }
        }

        let sampler = EquallySpacedSampler::new(&SamplerConfig { spacing, ..*config })?;
        let mut samples: Vec<PathSample> = sampler
            .sample_chain(curves.iter())
            .into_iter()
            .map(|(segment, s)| PathSample { point: s.point, t: s.t, segment })
            .collect();

        if config.fit_to_length {
            let half = spacing * 0.5;
            if self.closed {
                if samples.len() > 1 {
                    let first = samples[0].point;
                    if samples.last().map_or(false, |s| s.point.distance_to(first) < half) {
                        samples.pop();
                    }
                }
            } else {
                let last_segment = curves.len() - 1;
                let end = PathSample { point: curves[last_segment].p1(), t: 1.0, segment: last_segment };
                let count = samples.len();
                match samples.last_mut() {
                    Some(last) if count > 1 && last.point.distance_to(end.point) < half => *last = end,
                    _ => samples.push(end),
                }
            }
        }

        log::trace!("{} samples spaced by {spacing}", samples.len());

        Ok(samples)
    }

    /// The point of the path closest to `p`, with the segment it lies on.
    pub fn nearest_point(&self, p: Point2D, config: &NearestPointConfig) -> Option<(usize, NearestPoint)> {
        self.segments()
            .map(|(i, curve)| (i, curve.nearest_parameter(p, config)))
            .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
    }

    fn lone_anchor(&self) -> Vec<PathSample> {
        self.points
            .first()
            .map(|p| vec![PathSample { point: p.anchor, t: 0.0, segment: 0 }])
            .unwrap_or_default()
    }
}
