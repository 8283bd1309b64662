//! Piecewise linear interpolation over a breakpoint table.
//!
//! ## Usage
//!
//! Map a swipe offset onto indicator width or position. Each tab contributes
//! one breakpoint: the input is the offset at which its page is fully
//! visible, the output is the tab's measured width or min-X.
//!
//! ```
//! use tessera_tab_indicator::LinearInterpolation;
//!
//! let width = LinearInterpolation::new(vec![0.0, 375.0, 750.0], vec![60.0, 90.0, 75.0])?;
//! assert_eq!(width.evaluate(375.0), 90.0);
//! assert_eq!(width.evaluate(187.5), 75.0);
//! # Ok::<(), tessera_tab_indicator::InterpolationError>(())
//! ```

use thiserror::Error;

/// Configuration errors raised while building a [`LinearInterpolation`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    /// Input and output tables differ in length.
    #[error("breakpoint tables differ in length: {inputs} inputs, {outputs} outputs")]
    LengthMismatch {
        /// Number of input breakpoints.
        inputs: usize,
        /// Number of output breakpoints.
        outputs: usize,
    },
    /// At least two breakpoints are needed to form a segment.
    #[error("at least 2 breakpoints are required, got {0}")]
    TooFewBreakpoints(usize),
    /// An input breakpoint is NaN or smaller than the one before it.
    #[error("input breakpoint {index} is not ordered")]
    NonMonotonicInput {
        /// Position of the offending breakpoint.
        index: usize,
    },
}

/// A monotonic piecewise-linear lookup table.
///
/// Values outside the table are extrapolated along the nearest edge segment
/// rather than clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolation {
    inputs: Vec<f32>,
    outputs: Vec<f32>,
}

impl LinearInterpolation {
    /// Builds a table from ordered input breakpoints and their outputs.
    ///
    /// Consecutive equal inputs are accepted; such a segment evaluates to
    /// its start value. This is what a table built before the page extent is
    /// known looks like.
    pub fn new(inputs: Vec<f32>, outputs: Vec<f32>) -> Result<Self, InterpolationError> {
        if inputs.len() != outputs.len() {
            return Err(InterpolationError::LengthMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        if inputs.len() < 2 {
            return Err(InterpolationError::TooFewBreakpoints(inputs.len()));
        }
        if inputs[0].is_nan() {
            return Err(InterpolationError::NonMonotonicInput { index: 0 });
        }
        if let Some(index) = inputs
            .windows(2)
            .position(|pair| pair[1].is_nan() || pair[1] < pair[0])
        {
            return Err(InterpolationError::NonMonotonicInput { index: index + 1 });
        }

        Ok(Self { inputs, outputs })
    }

    /// Input breakpoints in ascending order.
    pub fn inputs(&self) -> &[f32] {
        &self.inputs
    }

    /// Output breakpoints matching [`Self::inputs`].
    pub fn outputs(&self) -> &[f32] {
        &self.outputs
    }

    /// Evaluates the table at `x`.
    pub fn evaluate(&self, x: f32) -> f32 {
        let i = self.segment_for(x);
        let (in_start, in_end) = (self.inputs[i], self.inputs[i + 1]);
        let (out_start, out_end) = (self.outputs[i], self.outputs[i + 1]);

        let span = in_end - in_start;
        if span == 0.0 {
            return out_start;
        }
        if x == in_end {
            return out_end;
        }

        let t = (x - in_start) / span;
        out_start + t * (out_end - out_start)
    }

    /// Index of the first segment with `in_i <= x <= in_{i+1}`, clamped to
    /// the edge segments.
    fn segment_for(&self, x: f32) -> usize {
        let reached = self.inputs.partition_point(|&b| b < x);
        reached.saturating_sub(1).min(self.inputs.len() - 2)
    }
}
