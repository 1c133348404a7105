// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rational B-spline curve type.

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::homogeneous::{lift_all, project_all};
use crate::{CurveDefect, HomogeneousPoint, NurbsError, Point, Rect, TranslateScale, Vec2};

/// A non-uniform rational B-spline curve in the plane.
///
/// The curve is defined by `n + 1` control points with one weight each, and
/// a non-decreasing knot vector `t_0..=t_m`. The degree is implied by the
/// counts, `d = m - n - 1`. The homogeneous control points
/// `(x·w, y·w, w)` are kept alongside and always agree with the points and
/// weights: every edit builds a complete new curve and replaces the old
/// one, so a reader never sees a half-edited state.
///
/// `min_distance` is not used by the curve math. It travels with the curve
/// for the benefit of whatever keeps the curve clear of the shapes it
/// connects.
#[derive(Clone, Debug)]
pub struct NurbsCurve {
    pub(crate) knots: Vec<f64>,
    pub(crate) points: Vec<Point>,
    pub(crate) weights: Vec<f64>,
    pub(crate) homogeneous: Vec<HomogeneousPoint>,
    pub(crate) degree: usize,
    pub(crate) min_distance: f64,
}

impl NurbsCurve {
    /// Create a curve from knots, control points and weights.
    ///
    /// The degree is `knots.len() - points.len() - 1` and must be at least 1
    /// and at most `points.len() - 1`. Knots must be non-decreasing, every
    /// value must be finite, and the parameter range `[t_d, t_{n+1}]` must
    /// not be empty. Weights of zero or below are accepted as given.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperspline::{CurveDefect, NurbsCurve, NurbsError, Point};
    ///
    /// let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
    /// let line = NurbsCurve::new(vec![0.0, 0.0, 1.0, 1.0], points.clone(), vec![1.0, 1.0], 0.0)?;
    /// assert_eq!(line.degree(), 1);
    ///
    /// let err = NurbsCurve::new(vec![0.0, 0.0, 1.0, 1.0], points, vec![1.0], 0.0);
    /// assert_eq!(
    ///     err.unwrap_err(),
    ///     NurbsError::InvalidCurve(CurveDefect::WeightCount { points: 2, weights: 1 })
    /// );
    /// # Ok::<(), NurbsError>(())
    /// ```
    pub fn new(
        knots: Vec<f64>,
        points: Vec<Point>,
        weights: Vec<f64>,
        min_distance: f64,
    ) -> Result<NurbsCurve, NurbsError> {
        let degree = validate(&knots, &points, &weights)?;
        log::trace!(
            "new degree {degree} curve, {} control points, {} knots",
            points.len(),
            knots.len()
        );
        let homogeneous = lift_all(&points, &weights);
        Ok(NurbsCurve {
            knots,
            points,
            weights,
            homogeneous,
            degree,
            min_distance,
        })
    }

    /// Create a curve with a clamped, uniformly spaced knot vector.
    ///
    /// The knots are `degree + 1` zeros, then `1, 2, ..`, then `degree + 1`
    /// copies of the last value, so the curve starts at the first control
    /// point and ends at the last.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperspline::{NurbsCurve, Point};
    ///
    /// let points = vec![
    ///     Point::new(0.0, 0.0),
    ///     Point::new(1.0, 2.0),
    ///     Point::new(3.0, 2.0),
    ///     Point::new(4.0, 0.0),
    /// ];
    /// let curve = NurbsCurve::clamped_uniform(points, vec![1.0; 4], 2, 0.0)?;
    /// assert_eq!(curve.knots(), &[0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0]);
    /// assert_eq!(curve.eval(2.0)?, Point::new(4.0, 0.0));
    /// # Ok::<(), hyperspline::NurbsError>(())
    /// ```
    pub fn clamped_uniform(
        points: Vec<Point>,
        weights: Vec<f64>,
        degree: usize,
        min_distance: f64,
    ) -> Result<NurbsCurve, NurbsError> {
        let spans = points.len().saturating_sub(degree);
        let mut knots = vec![0.0; degree + 1];
        knots.extend((1..spans).map(|i| i as f64));
        knots.resize(points.len() + degree + 1, spans as f64);
        NurbsCurve::new(knots, points, weights, min_distance)
    }

    /// Create an exact circular arc.
    ///
    /// The arc starts at `start_angle` and turns by `sweep` radians,
    /// counterclockwise for positive `sweep` in a y-up coordinate system.
    /// It is assembled from quadratic segments of at most a quarter turn
    /// each, joined at double knots, over the parameter range `[0, 1]`.
    /// Sweeps beyond a full turn are clamped to one full turn, which yields
    /// a closed curve.
    ///
    /// Non-finite arguments produce a curve with non-finite control points.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperspline::{NurbsCurve, Point};
    /// use std::f64::consts::PI;
    ///
    /// let arc = NurbsCurve::circular_arc(Point::new(0.0, 0.0), 2.0, 0.0, PI);
    /// let top = arc.eval(0.5)?;
    /// assert!((top.distance(Point::new(0.0, 2.0))) < 1e-9);
    /// # Ok::<(), hyperspline::NurbsError>(())
    /// ```
    pub fn circular_arc(center: Point, radius: f64, start_angle: f64, sweep: f64) -> NurbsCurve {
        let sweep = sweep.clamp(-TAU, TAU);
        let n_segments = ((sweep.abs() / FRAC_PI_2).ceil() as usize).max(1);
        let seg = sweep / n_segments as f64;
        let (_, half_cos) = (seg * 0.5).sin_cos();
        let on_circle = |angle: f64| {
            let (s, c) = angle.sin_cos();
            center + Vec2::new(c, s) * radius
        };

        let mut points = Vec::with_capacity(2 * n_segments + 1);
        let mut weights = Vec::with_capacity(2 * n_segments + 1);
        let mut knots = vec![0.0; 3];
        points.push(on_circle(start_angle));
        weights.push(1.0);
        for i in 0..n_segments {
            let a0 = start_angle + seg * i as f64;
            let (s, c) = (a0 + seg * 0.5).sin_cos();
            points.push(center + Vec2::new(c, s) * (radius / half_cos));
            weights.push(half_cos);
            points.push(on_circle(a0 + seg));
            weights.push(1.0);
            if i + 1 < n_segments {
                let k = (i + 1) as f64 / n_segments as f64;
                knots.extend([k, k]);
            }
        }
        knots.extend([1.0; 3]);
        if sweep.abs() == TAU {
            // Close exactly; the trigonometry alone leaves a rounding gap.
            let first = points[0];
            if let Some(last) = points.last_mut() {
                *last = first;
            }
        }

        let homogeneous = lift_all(&points, &weights);
        NurbsCurve {
            knots,
            points,
            weights,
            homogeneous,
            degree: 2,
            min_distance: 0.0,
        }
    }

    /// Rebuild a curve from edited homogeneous control points.
    ///
    /// The caller guarantees the knots and the point count agree and that
    /// the degree is unchanged, as after knot refinement.
    pub(crate) fn from_homogeneous(
        knots: Vec<f64>,
        pw: &[HomogeneousPoint],
        min_distance: f64,
    ) -> NurbsCurve {
        let (points, weights) = project_all(pw);
        let degree = knots.len() - points.len() - 1;
        // The table is always lifted from the points and weights.
        let homogeneous = lift_all(&points, &weights);
        NurbsCurve {
            knots,
            points,
            weights,
            homogeneous,
            degree,
            min_distance,
        }
    }

    /// The knot vector `t_0..=t_m`.
    #[inline]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// The control points, in the plane.
    #[inline]
    pub fn control_points(&self) -> &[Point] {
        &self.points
    }

    /// The weight of each control point.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The control points lifted to homogeneous coordinates.
    #[inline]
    pub fn homogeneous(&self) -> &[HomogeneousPoint] {
        &self.homogeneous
    }

    /// The polynomial degree of each span.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The clearance the curve's owner wants kept around it.
    #[inline]
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// The same curve with a different clearance.
    #[must_use]
    pub fn with_min_distance(mut self, min_distance: f64) -> NurbsCurve {
        self.min_distance = min_distance;
        self
    }

    /// The parameter range `(t_0, t_m)` accepted by evaluation.
    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        let end = self.knots[self.knots.len() - 1];
        (self.knots[0], end)
    }

    /// Whether the first and last control points coincide.
    pub fn is_closed(&self) -> bool {
        self.points.first() == self.points.last()
    }

    /// Whether the first and last knots are each repeated `degree + 1`
    /// times, so the curve starts and ends at its end control points.
    pub fn is_clamped(&self) -> bool {
        let d = self.degree;
        let m = self.knots.len() - 1;
        self.knots[..=d].iter().all(|&t| t == self.knots[0])
            && self.knots[m - d..].iter().all(|&t| t == self.knots[m])
    }

    /// The bounding box of the control points.
    ///
    /// The curve lies within the convex hull of its control points when all
    /// weights are positive, so this contains the curve, but it is usually
    /// larger than the curve's own bounding box.
    pub fn bounding_box(&self) -> Rect {
        let first = self.points[0];
        self.points[1..]
            .iter()
            .fold(Rect::from_points(first, first), |bbox, &p| bbox.union_pt(p))
    }

    /// The control point closest to `p`.
    ///
    /// On a tie, the earliest control point wins.
    pub fn nearest_control_point(&self, p: Point) -> Point {
        let mut best = self.points[0];
        let mut best_dist = best.distance_squared(p);
        for &cp in &self.points[1..] {
            let dist = cp.distance_squared(p);
            if dist < best_dist {
                best = cp;
                best_dist = dist;
            }
        }
        best
    }

    /// Scale the curve about the origin.
    ///
    /// Control point coordinates are multiplied by `factor`; knots and
    /// weights stay as they are. See [`scale_in_place`](Self::scale_in_place)
    /// to resize the curve without moving it away.
    pub fn scale(&mut self, factor: f64) {
        self.apply(TranslateScale::scale(factor));
    }

    /// Scale the curve about `center`, which stays fixed.
    pub fn scale_about(&mut self, center: Point, factor: f64) {
        let to_center = TranslateScale::translate(center.to_vec2());
        self.apply(to_center * TranslateScale::scale(factor) * to_center.inverse());
    }

    /// Scale the curve about the center of its control-point bounding box.
    pub fn scale_in_place(&mut self, factor: f64) {
        self.scale_about(self.bounding_box().center(), factor);
    }

    /// Move the curve by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        self.apply(TranslateScale::translate(offset));
    }

    /// Transform the curve in place.
    pub fn apply(&mut self, ts: TranslateScale) {
        *self = ts * &*self;
        log::trace!("transformed curve by {ts:?}");
    }

    /// A copy of the curve with every control point mapped through `f`.
    pub(crate) fn map_control_points(&self, f: impl Fn(Point) -> Point) -> NurbsCurve {
        let points: Vec<Point> = self.points.iter().map(|&p| f(p)).collect();
        let homogeneous = lift_all(&points, &self.weights);
        NurbsCurve {
            knots: self.knots.clone(),
            points,
            weights: self.weights.clone(),
            homogeneous,
            degree: self.degree,
            min_distance: self.min_distance,
        }
    }
}

/// Two curves are equal when their knots, control points and weights are.
///
/// The clearance is not part of the curve's shape and is ignored.
impl PartialEq for NurbsCurve {
    fn eq(&self, other: &NurbsCurve) -> bool {
        self.knots == other.knots && self.points == other.points && self.weights == other.weights
    }
}

/// Check the arrays for consistency and return the implied degree.
fn validate(knots: &[f64], points: &[Point], weights: &[f64]) -> Result<usize, CurveDefect> {
    if points.is_empty() {
        return Err(CurveDefect::NoControlPoints);
    }
    if weights.len() != points.len() {
        return Err(CurveDefect::WeightCount {
            points: points.len(),
            weights: weights.len(),
        });
    }
    if knots.len() < points.len() + 2 {
        return Err(CurveDefect::TooFewKnots {
            points: points.len(),
            knots: knots.len(),
        });
    }
    if knots.len() > 2 * points.len() {
        return Err(CurveDefect::TooManyKnots {
            points: points.len(),
            knots: knots.len(),
        });
    }
    let finite = knots.iter().all(|t| t.is_finite())
        && weights.iter().all(|w| w.is_finite())
        && points.iter().all(|p| p.is_finite());
    if !finite {
        return Err(CurveDefect::NonFinite);
    }
    if let Some(i) = knots.windows(2).position(|pair| pair[1] < pair[0]) {
        return Err(CurveDefect::DecreasingKnots { index: i + 1 });
    }
    let degree = knots.len() - points.len() - 1;
    if knots[degree] == knots[points.len()] {
        return Err(CurveDefect::EmptyDomain);
    }
    Ok(degree)
}
