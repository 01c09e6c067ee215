//! Flattening and arc length sampling of cubic bézier curves.
//!
//! A [`CubicBezier`] can be turned into a polyline within a distance
//! tolerance with one of three adaptive strategies (see [`FlattenStrategy`]),
//! or sampled at equal arc length intervals with an
//! [`EquallySpacedSampler`]. [`BezierPath`] chains segments and takes care of
//! the anchors they share.

use lyon_path::geom::LineSegment;

pub mod algorithms;
pub mod config;
pub mod cubic;
pub mod error;
pub mod flatness;
pub mod flattened;
pub mod output;
pub mod path;
pub mod point;
pub mod sampler;
pub mod svg;
pub mod testing;
pub mod util;

pub use config::{ArcLengthConfig, FlattenConfig, FlattenStrategy, NearestPointConfig, SamplerConfig};
pub use cubic::{CubicBezier, CubicPolynomial, NearestPoint};
pub use error::{FlattenError, Result};
pub use flattened::{Flattened, SamplePoint};
pub use path::{BezierPath, PathPoint, PathSample};
pub use point::{point, Point2D};
pub use sampler::{EquallySpacedSampler, SegmentSamples};

/// A flattening strategy that can be selected statically.
///
/// The configuration is expected to be valid, see [`FlattenConfig::validate`].
pub trait Flatten {
    fn cubic(curve: &CubicBezier, config: &FlattenConfig) -> Flattened;

    fn for_each_line<Cb: FnMut(&LineSegment<f64>)>(curve: &CubicBezier, config: &FlattenConfig, cb: &mut Cb) {
        let flattened = Self::cubic(curve, config);
        for pair in flattened.points.windows(2) {
            cb(&LineSegment { from: pair[0].into(), to: pair[1].into() });
        }
    }
}

pub struct MidpointBisection;
impl Flatten for MidpointBisection {
    fn cubic(curve: &CubicBezier, config: &FlattenConfig) -> Flattened {
        crate::algorithms::bisection::flatten_cubic(curve, config)
    }
}

pub struct EqualSubdivision;
impl Flatten for EqualSubdivision {
    fn cubic(curve: &CubicBezier, config: &FlattenConfig) -> Flattened {
        crate::algorithms::equal_subdivision::flatten_cubic(curve, config)
    }
}

pub struct TangentExtremum;
impl Flatten for TangentExtremum {
    fn cubic(curve: &CubicBezier, config: &FlattenConfig) -> Flattened {
        crate::algorithms::tangent::flatten_cubic(curve, config)
    }
}

impl FlattenStrategy {
    /// Runs the strategy without validating the configuration first.
    pub fn flatten_unchecked(self, curve: &CubicBezier, config: &FlattenConfig) -> Flattened {
        match self {
            FlattenStrategy::MidpointBisection => MidpointBisection::cubic(curve, config),
            FlattenStrategy::EqualSubdivision => EqualSubdivision::cubic(curve, config),
            FlattenStrategy::TangentExtremum => TangentExtremum::cubic(curve, config),
        }
    }
}

/// Flattens a single segment with the strategy selected in `config`.
///
/// The returned parameters start at 0, end at 1 and are strictly
/// increasing.
pub fn flatten(curve: &CubicBezier, config: &FlattenConfig) -> Result<Flattened> {
    config.validate()?;

    let flattened = config.strategy.flatten_unchecked(curve, config);
    log::trace!("{} produced {} points", config.strategy, flattened.len());

    Ok(flattened)
}

#[test]
fn strategies_agree_with_dispatch() {
    let curve = testing::s_curve();
    let config = FlattenConfig::new(0.5, FlattenStrategy::MidpointBisection);
    assert_eq!(flatten(&curve, &config).unwrap(), MidpointBisection::cubic(&curve, &config));

    let config = FlattenConfig { strategy: FlattenStrategy::EqualSubdivision, ..config };
    assert_eq!(flatten(&curve, &config).unwrap(), EqualSubdivision::cubic(&curve, &config));

    let config = FlattenConfig { strategy: FlattenStrategy::TangentExtremum, ..config };
    assert_eq!(flatten(&curve, &config).unwrap(), TangentExtremum::cubic(&curve, &config));
}

#[test]
fn lines_follow_the_points() {
    let curve = testing::s_curve();
    let config = FlattenConfig::new(2.0, FlattenStrategy::EqualSubdivision);
    let mut lines = Vec::new();
    EqualSubdivision::for_each_line(&curve, &config, &mut |line| lines.push(*line));

    assert_eq!(lines.len(), 3);
    assert_eq!(Point2D::from(lines[0].from), curve.p0());
    assert_eq!(Point2D::from(lines[2].to), curve.p1());
    assert_eq!(lines[0].to, lines[1].from);
}

#[test]
fn flatten_validates_the_config() {
    let config = FlattenConfig { max_divisions: 0, ..FlattenConfig::default() };
    assert!(matches!(flatten(&testing::s_curve(), &config), Err(FlattenError::InvalidDepth)));
}
