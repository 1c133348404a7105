// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point evaluation with the de Boor recurrence.

use smallvec::SmallVec;

use crate::span::{find_span, span_in_range};
use crate::{HomogeneousPoint, NurbsCurve, NurbsError, Point};

/// Blend the `degree + 1` homogeneous control points of `span` at `t`.
///
/// This is the non-rational recurrence; the caller projects the result.
/// Knot intervals of zero length contribute an `alpha` of 0.
pub(crate) fn de_boor(
    knots: &[f64],
    pw: &[HomogeneousPoint],
    degree: usize,
    span: usize,
    t: f64,
) -> HomogeneousPoint {
    let base = span - degree;
    let mut tmp: SmallVec<[HomogeneousPoint; 8]> = pw[base..=span].iter().copied().collect();
    for k in 1..=degree {
        for l in (base + k..=span).rev() {
            let denom = knots[l + degree - k + 1] - knots[l];
            let alpha = if denom == 0.0 {
                0.0
            } else {
                (t - knots[l]) / denom
            };
            let i = l - base;
            tmp[i] = tmp[i - 1].lerp(tmp[i], alpha);
        }
    }
    tmp[degree]
}

/// Evaluate a homogeneous B-spline, clamping `t` to a valid span.
#[inline]
pub(crate) fn eval_homogeneous(
    knots: &[f64],
    pw: &[HomogeneousPoint],
    degree: usize,
    t: f64,
) -> HomogeneousPoint {
    de_boor(knots, pw, degree, span_in_range(knots, degree, t), t)
}

impl NurbsCurve {
    /// Evaluate the curve at parameter `t`.
    ///
    /// `t` must lie within [`domain`](Self::domain); the curve is never
    /// clamped or extrapolated implicitly. Where the blended weight is
    /// zero, the weighted coordinates are returned undivided.
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
    /// assert_eq!(line.eval(0.5)?, Point::new(5.0, 0.0));
    /// assert!(line.eval(1.5).is_err());
    /// # Ok::<(), hyperspline::NurbsError>(())
    /// ```
    pub fn eval(&self, t: f64) -> Result<Point, NurbsError> {
        let span = find_span(&self.knots, self.degree, t)?;
        Ok(de_boor(&self.knots, &self.homogeneous, self.degree, span, t).project())
    }

    /// Evaluate the curve in homogeneous coordinates, before projection.
    pub fn eval_homogeneous(&self, t: f64) -> Result<HomogeneousPoint, NurbsError> {
        let span = find_span(&self.knots, self.degree, t)?;
        Ok(de_boor(&self.knots, &self.homogeneous, self.degree, span, t))
    }

    /// The index of the knot span governing `t`.
    ///
    /// The result `j` satisfies `knots[j] <= t < knots[j + 1]` and lies in
    /// `degree..=n` for `n + 1` control points. The last knot maps to the
    /// last span rather than past it.
    pub fn find_span(&self, t: f64) -> Result<usize, NurbsError> {
        find_span(&self.knots, self.degree, t)
    }

    /// Evaluate at a parameter already known to lie in the domain.
    pub(crate) fn eval_in_domain(&self, t: f64) -> Point {
        eval_homogeneous(&self.knots, &self.homogeneous, self.degree, t).project()
    }
}
