// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Knot refinement: inserting knots without changing the curve.

use alloc::vec;
use alloc::vec::Vec;

use crate::span::span_in_range;
use crate::{ArgumentError, HomogeneousPoint, NurbsCurve, NurbsError};

/// Insert the sorted knots `new_knots` into a homogeneous B-spline.
///
/// Returns the refined knot vector and control points. The degree is
/// unchanged, and so is the curve as a function of the parameter. The
/// affected control points are recomputed from the last inserted knot to
/// the first, as in Boehm's algorithm applied to all knots at once.
///
/// `new_knots` must be non-empty, non-decreasing, and lie within
/// `[knots[degree], knots[n + 1]]`.
pub(crate) fn refine(
    knots: &[f64],
    pw: &[HomogeneousPoint],
    degree: usize,
    new_knots: &[f64],
) -> (Vec<f64>, Vec<HomogeneousPoint>) {
    let p = degree;
    let n = pw.len() - 1;
    let m = knots.len() - 1;
    let r = new_knots.len() - 1;
    let a = span_in_range(knots, p, new_knots[0]);
    let b = span_in_range(knots, p, new_knots[r]) + 1;

    let mut qw = vec![HomogeneousPoint::ZERO; n + r + 2];
    let mut ubar = vec![0.0; m + r + 2];
    // Control points and knots outside [a, b] are unaffected.
    qw[..=a - p].copy_from_slice(&pw[..=a - p]);
    qw[b + r..].copy_from_slice(&pw[b - 1..]);
    ubar[..=a].copy_from_slice(&knots[..=a]);
    ubar[b + p + r + 1..].copy_from_slice(&knots[b + p..]);

    let mut i = b + p - 1;
    let mut k = b + p + r;
    for &x in new_knots.iter().rev() {
        while x <= knots[i] && i > a {
            qw[k - p - 1] = pw[i - p - 1];
            ubar[k] = knots[i];
            k -= 1;
            i -= 1;
        }
        qw[k - p - 1] = qw[k - p];
        for l in 1..=p {
            let ind = k - p + l;
            let alpha = ubar[k + l] - x;
            if alpha == 0.0 {
                qw[ind - 1] = qw[ind];
            } else {
                let alpha = alpha / (ubar[k + l] - knots[i - p + l]);
                qw[ind - 1] = qw[ind - 1] * alpha + qw[ind] * (1.0 - alpha);
            }
        }
        ubar[k] = x;
        k -= 1;
    }
    (ubar, qw)
}

impl NurbsCurve {
    /// Insert knots while leaving the curve's shape unchanged.
    ///
    /// `new_knots` must be sorted in non-decreasing order and lie within the
    /// parameter range `[t_d, t_{n+1}]`, which is the whole knot range for
    /// clamped curves. An unclamped curve rejects knots in `[t_0, t_d)` and
    /// `(t_{n+1}, t_m]` even though [`domain`](Self::domain) accepts them for
    /// evaluation. Values may repeat and may coincide with existing
    /// knots. Each inserted knot adds one control point; the degree stays
    /// the same.
    ///
    /// The curve is replaced as a whole; on error it is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperspline::{NurbsCurve, Point};
    ///
    /// let mut curve = NurbsCurve::new(
    ///     vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
    ///     vec![
    ///         Point::new(0.0, 0.0),
    ///         Point::new(0.0, 1.0),
    ///         Point::new(1.0, 1.0),
    ///         Point::new(1.0, 0.0),
    ///     ],
    ///     vec![1.0; 4],
    ///     0.0,
    /// )?;
    /// let before = curve.eval(0.25)?;
    /// curve.refine_knots(&[0.5])?;
    /// assert_eq!(curve.control_points().len(), 5);
    /// assert!(curve.eval(0.25)?.distance(before) < 1e-12);
    /// # Ok::<(), hyperspline::NurbsError>(())
    /// ```
    pub fn refine_knots(&mut self, new_knots: &[f64]) -> Result<(), NurbsError> {
        *self = self.with_refined_knots(new_knots)?;
        Ok(())
    }

    /// A copy of this curve with additional knots; see
    /// [`refine_knots`](Self::refine_knots).
    pub fn with_refined_knots(&self, new_knots: &[f64]) -> Result<NurbsCurve, NurbsError> {
        if new_knots.windows(2).any(|pair| !(pair[0] <= pair[1])) {
            return Err(ArgumentError::UnsortedKnots.into());
        }
        let n = self.points.len() - 1;
        let (lo, hi) = (self.knots[self.degree], self.knots[n + 1]);
        if let Some(&value) = new_knots.iter().find(|&&x| !(x >= lo && x <= hi)) {
            return Err(ArgumentError::KnotOutOfDomain { value }.into());
        }
        if new_knots.is_empty() {
            return Ok(self.clone());
        }
        let (knots, pw) = refine(&self.knots, &self.homogeneous, self.degree, new_knots);
        log::trace!(
            "refined curve from {} to {} control points",
            self.points.len(),
            pw.len()
        );
        Ok(NurbsCurve::from_homogeneous(knots, &pw, self.min_distance))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::{ArgumentError, NurbsCurve, NurbsError, Point};

    fn unit_square_cubic() -> NurbsCurve {
        NurbsCurve::new(
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 1.0),
                Point::new(1.0, 1.0),
                Point::new(1.0, 0.0),
            ],
            vec![1.0; 4],
            0.0,
        )
        .unwrap()
    }

    fn wavy_rational() -> NurbsCurve {
        NurbsCurve::new(
            vec![0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 3.0, 4.0, 4.0, 4.0],
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 4.0),
                Point::new(3.0, -2.0),
                Point::new(5.0, 3.0),
                Point::new(6.0, 0.0),
                Point::new(8.0, 2.0),
                Point::new(9.0, -1.0),
            ],
            vec![1.0, 0.5, 2.0, 1.0, 0.8, 3.0, 1.0],
            1.5,
        )
        .unwrap()
    }

    fn assert_same_shape(before: &NurbsCurve, after: &NurbsCurve, epsilon: f64) {
        let (start, end) = before.domain();
        for i in 0..=200 {
            let t = start + (end - start) * f64::from(i) / 200.0;
            let p0 = before.eval(t).unwrap();
            let p1 = after.eval(t).unwrap();
            assert!(p0.distance(p1) < epsilon, "at t={t}: {p0:?} != {p1:?}");
        }
    }

    #[test]
    fn empty_refinement_is_identity() {
        let mut c = wavy_rational();
        let before = c.clone();
        c.refine_knots(&[]).unwrap();
        assert_eq!(c, before);
        assert_same_shape(&before, &c, 1e-9);
    }

    #[test]
    fn insert_midpoint_into_cubic() {
        let mut c = unit_square_cubic();
        let before = c.eval(0.5).unwrap();
        c.refine_knots(&[0.5]).unwrap();
        assert_eq!(c.knots(), &[0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(c.degree(), 3);
        assert_eq!(c.control_points().len(), 5);
        assert!(c.eval(0.5).unwrap().distance(before) < 1e-9);
        // Boehm insertion at the midpoint of a Bézier segment.
        assert_eq!(c.control_points()[1], Point::new(0.0, 0.5));
        assert_eq!(c.control_points()[3], Point::new(1.0, 0.5));
    }

    #[test]
    fn many_knots_preserve_rational_shape() {
        let c = wavy_rational();
        let refined = c
            .with_refined_knots(&[0.0, 0.5, 1.0, 1.0, 2.0, 2.7, 3.9, 4.0])
            .unwrap();
        assert_eq!(refined.knots().len(), c.knots().len() + 8);
        assert_eq!(refined.control_points().len(), c.control_points().len() + 8);
        assert_eq!(refined.weights().len(), refined.control_points().len());
        assert_eq!(refined.degree(), c.degree());
        assert_eq!(refined.min_distance(), c.min_distance());
        assert!(refined.knots().windows(2).all(|w| w[0] <= w[1]));
        assert_same_shape(&c, &refined, 1e-9);
    }

    #[test]
    fn random_refinements_preserve_shape() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let c = wavy_rational();
            let count = rng.random_range(1..6);
            let mut new_knots: Vec<f64> = (0..count).map(|_| rng.random_range(0.0..=4.0)).collect();
            new_knots.sort_by(f64::total_cmp);
            let refined = c.with_refined_knots(&new_knots).unwrap();
            assert_same_shape(&c, &refined, 1e-9);
        }
    }

    #[test]
    fn out_of_domain_knot_is_rejected() {
        let mut c = unit_square_cubic();
        let before = c.clone();
        assert_eq!(
            c.refine_knots(&[0.5, 1.5]),
            Err(NurbsError::InvalidArgument(ArgumentError::KnotOutOfDomain {
                value: 1.5
            }))
        );
        assert_eq!(c, before);
        assert!(c.refine_knots(&[f64::NAN]).is_err());
    }

    #[test]
    fn unclamped_curve_refines_inside_its_valid_range() {
        // Degree 2 with three control points: the valid range is [2, 3].
        let c = NurbsCurve::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)],
            vec![1.0; 3],
            0.0,
        )
        .unwrap();
        assert!(c.eval(1.0).is_ok());
        for value in [1.0, 1.999, 3.5, 5.0] {
            assert_eq!(
                c.with_refined_knots(&[value]),
                Err(NurbsError::InvalidArgument(ArgumentError::KnotOutOfDomain {
                    value
                }))
            );
        }

        let refined = c.with_refined_knots(&[2.5]).unwrap();
        assert_eq!(refined.knots(), &[0.0, 1.0, 2.0, 2.5, 3.0, 4.0, 5.0]);
        assert_eq!(refined.control_points()[1], Point::new(0.75, 0.75));
        assert_eq!(refined.control_points()[2], Point::new(1.25, 0.75));
        for i in 0..=20 {
            let t = 2.0 + f64::from(i) / 20.0;
            let p0 = c.eval(t).unwrap();
            let p1 = refined.eval(t).unwrap();
            assert!(p0.distance(p1) < 1e-12, "at t={t}");
        }
    }

    #[test]
    fn unsorted_knots_are_rejected() {
        let c = unit_square_cubic();
        assert_eq!(
            c.with_refined_knots(&[0.7, 0.2]),
            Err(NurbsError::InvalidArgument(ArgumentError::UnsortedKnots))
        );
    }
}
