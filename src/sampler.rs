use std::borrow::Cow;

use crate::config::{ArcLengthConfig, SamplerConfig};
use crate::cubic::CubicBezier;
use crate::error::Result;
use crate::flattened::SamplePoint;

/// Samples of one segment and the offset of the next sample into the
/// following segment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentSamples {
    pub samples: Vec<SamplePoint>,
    /// Arc length from the start of the next segment to the next sample.
    pub remainder: f64,
}

/// Places points at a fixed arc length distance along a curve or a chain of
/// curves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EquallySpacedSampler {
    spacing: f64,
    arc_length: ArcLengthConfig,
}

impl EquallySpacedSampler {
    pub fn new(config: &SamplerConfig) -> Result<Self> {
        config.validate()?;

        Ok(EquallySpacedSampler {
            spacing: config.spacing,
            arc_length: config.arc_length,
        })
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Samples a single segment.
    ///
    /// The first sample is `initial_length` along the curve, then one every
    /// `spacing` as long as it stays before the end of the segment. An
    /// offset past the end of the segment produces no sample and is carried
    /// over, reduced by the segment length. Negative offsets are treated as
    /// zero, so the returned remainder is never negative.
    pub fn sample_segment(&self, curve: &CubicBezier, initial_length: f64) -> SegmentSamples {
        let initial_length = initial_length.max(0.0);

        let curve = if curve.arc_length_config() == &self.arc_length {
            Cow::Borrowed(curve)
        } else {
            Cow::Owned(curve.clone().with_arc_length_config(self.arc_length))
        };

        let length = curve.total_length();
        let mut samples = Vec::new();

        if initial_length > length {
            return SegmentSamples { samples, remainder: initial_length - length };
        }

        let mut i = 0;
        let mut offset = initial_length;
        while offset < length {
            let t = curve.parameter_at_length(offset);
            samples.push(SamplePoint { point: curve.evaluate(t), t });
            i += 1;
            offset = initial_length + i as f64 * self.spacing;
        }

        SegmentSamples { samples, remainder: offset - length }
    }

    /// Samples consecutive segments, carrying the remainder across segment
    /// boundaries so the spacing stays even along the whole chain.
    ///
    /// Each sample is returned with the index of its segment.
    pub fn sample_chain<'l, I>(&self, curves: I) -> Vec<(usize, SamplePoint)>
    where
        I: IntoIterator<Item = &'l CubicBezier>,
    {
        let mut result = Vec::new();
        let mut remainder = 0.0;
        for (index, curve) in curves.into_iter().enumerate() {
            let segment = self.sample_segment(curve, remainder);
            remainder = segment.remainder;
            result.extend(segment.samples.into_iter().map(|s| (index, s)));
        }

        result
    }
}
