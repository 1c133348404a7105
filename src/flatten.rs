// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Approximating a curve by a polyline.

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::{ArgumentError, NurbsCurve, NurbsError, Point};

/// Points sampled from a curve at fixed parameter steps.
///
/// Created by [`NurbsCurve::flatten`].
#[derive(Clone, Debug)]
pub struct Flatten<'a> {
    curve: &'a NurbsCurve,
    start: f64,
    end: f64,
    step: f64,
    ix: usize,
    last: usize,
}

impl NurbsCurve {
    /// Sample the curve at every `step` in parameter space.
    ///
    /// The first point is at the start of the domain and the last exactly
    /// at its end, so joining them yields a polyline from end to end. The
    /// sampling does not adapt to curvature: tight bends get as few points as
    /// straight stretches, so pick `step` for the sharpest bend that needs
    /// to render smoothly.
    ///
    /// Returns an error unless `step` is positive and finite, and also when
    /// it is so small that the number of points would not fit in a `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperspline::{NurbsCurve, Point};
    ///
    /// let line = NurbsCurve::new(
    ///     vec![0.0, 0.0, 1.0, 1.0],
    ///     vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
    ///     vec![1.0, 1.0],
    ///     0.0,
    /// )?;
    /// let points: Vec<Point> = line.flatten(0.25)?.collect();
    /// assert_eq!(points.len(), 5);
    /// assert_eq!(points[4], Point::new(10.0, 0.0));
    /// # Ok::<(), hyperspline::NurbsError>(())
    /// ```
    pub fn flatten(&self, step: f64) -> Result<Flatten<'_>, NurbsError> {
        if !(step > 0.0 && step.is_finite()) {
            return Err(ArgumentError::NonPositiveStep.into());
        }
        let (start, end) = self.domain();
        let steps = ((end - start) / step).ceil();
        // `usize::MAX as f64` rounds up, so this also leaves room for the
        // final point.
        if !(steps < usize::MAX as f64) {
            return Err(ArgumentError::StepTooSmall.into());
        }
        let last = steps as usize;
        Ok(Flatten {
            curve: self,
            start,
            end,
            step,
            ix: 0,
            last,
        })
    }
}

impl Iterator for Flatten<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.ix > self.last {
            return None;
        }
        let t = if self.ix == self.last {
            self.end
        } else {
            (self.start + self.step * self.ix as f64).min(self.end)
        };
        self.ix += 1;
        Some(self.curve.eval_in_domain(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.last.saturating_add(1).saturating_sub(self.ix);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Flatten<'_> {}
