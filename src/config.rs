use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{FlattenError, Result};

/// Selects how a curve is subdivided.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FlattenStrategy {
    /// Bisect at the parameter midpoint while the midpoint sample deviates
    /// from the chord ("mid_t").
    MidpointBisection,
    /// Split at `n` equal parameter steps, with the smallest `n` for which
    /// every piece is flat ("divide_t").
    #[default]
    EqualSubdivision,
    /// Split at the point where the tangent is parallel to the chord
    /// ("tangent").
    TangentExtremum,
}

impl FlattenStrategy {
    pub const ALL: [FlattenStrategy; 3] = [
        FlattenStrategy::MidpointBisection,
        FlattenStrategy::EqualSubdivision,
        FlattenStrategy::TangentExtremum,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FlattenStrategy::MidpointBisection => "mid_t",
            FlattenStrategy::EqualSubdivision => "divide_t",
            FlattenStrategy::TangentExtremum => "tangent",
        }
    }
}

impl fmt::Display for FlattenStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown flattening strategy {0:?} (expected mid_t, divide_t or tangent)")]
pub struct UnknownStrategy(pub String);

impl FromStr for FlattenStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "mid_t" => Ok(FlattenStrategy::MidpointBisection),
            "divide_t" => Ok(FlattenStrategy::EqualSubdivision),
            "tangent" => Ok(FlattenStrategy::TangentExtremum),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

/// Parameters of the flattening algorithms.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct FlattenConfig {
    /// Maximum distance between the curve and the polyline.
    pub max_error: f64,
    /// Maximum length of a polyline edge, 0 disables the bound. Straight
    /// segments are divided too when this is set.
    pub max_dist_between_points: f64,
    pub strategy: FlattenStrategy,
    /// Recursion limit of the bisecting strategies.
    pub max_depth: u32,
    /// Largest division count tried by the equal subdivision strategy.
    pub max_divisions: u32,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig {
            max_error: 0.2,
            max_dist_between_points: 0.0,
            strategy: FlattenStrategy::default(),
            max_depth: 24,
            max_divisions: 1024,
        }
    }
}

impl FlattenConfig {
    pub fn new(max_error: f64, strategy: FlattenStrategy) -> Self {
        FlattenConfig {
            max_error,
            strategy,
            ..FlattenConfig::default()
        }
    }

    pub fn with_max_dist_between_points(mut self, max_dist: f64) -> Self {
        self.max_dist_between_points = max_dist;
        self
    }

    pub fn validate(&self) -> Result<()> {
        // Written this way so that NaN is rejected as well.
        if !(self.max_error > 0.0) {
            return Err(FlattenError::InvalidTolerance(self.max_error));
        }
        if !(self.max_dist_between_points >= 0.0) {
            return Err(FlattenError::InvalidMaxDistance(self.max_dist_between_points));
        }
        if self.max_depth == 0 || self.max_divisions == 0 {
            return Err(FlattenError::InvalidDepth);
        }

        Ok(())
    }

    #[inline]
    pub(crate) fn has_max_dist(&self) -> bool {
        self.max_dist_between_points > 0.0
    }

    /// Whether an edge of the given squared length is too long.
    #[inline]
    pub(crate) fn too_long(&self, square_length: f64) -> bool {
        self.has_max_dist()
            && square_length > self.max_dist_between_points * self.max_dist_between_points
    }
}

/// Parameters of the arc length integration and of its inverse.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct ArcLengthConfig {
    /// Number of Simpson sub-intervals, rounded up to an even number.
    pub subdivisions: u32,
    /// Length difference under which the inverse lookup stops.
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for ArcLengthConfig {
    fn default() -> Self {
        ArcLengthConfig {
            subdivisions: 128,
            tolerance: 0.001,
            max_iterations: 30,
        }
    }
}

/// Parameters of the nearest point search.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct NearestPointConfig {
    /// Parameter step of the initial scan.
    pub initial_step: f64,
    /// The search stops when the squared distance between the ends of the
    /// search window falls under this value.
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for NearestPointConfig {
    fn default() -> Self {
        NearestPointConfig {
            initial_step: 0.05,
            tolerance: 0.00001,
            max_iterations: 100,
        }
    }
}

/// Parameters of the equally spaced sampler.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SamplerConfig {
    /// Arc length between two consecutive samples.
    pub spacing: f64,
    /// Adjust the spacing so that a whole path is divided evenly.
    pub fit_to_length: bool,
    pub arc_length: ArcLengthConfig,
}

impl SamplerConfig {
    pub fn new(spacing: f64) -> Self {
        SamplerConfig {
            spacing,
            fit_to_length: false,
            arc_length: ArcLengthConfig::default(),
        }
    }

    pub fn fit_to_length(mut self) -> Self {
        self.fit_to_length = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.spacing > 0.0) || !self.spacing.is_finite() {
            return Err(FlattenError::InvalidSpacing(self.spacing));
        }

        Ok(())
    }
}
