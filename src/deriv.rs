// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derivatives of rational B-spline curves.
//!
//! The homogeneous curve `Cw(t) = (A(t), W(t))` is an ordinary B-spline, so
//! its derivatives are B-splines of lower degree whose control points follow
//! from differences of the original ones. The derivatives of the rational
//! curve `C(t) = A(t) / W(t)` are then recovered with the generalized
//! quotient rule:
//!
//! ```text
//! C⁽ᵏ⁾ = (A⁽ᵏ⁾ - Σᵢ₌₁..ₖ binom(k, i) W⁽ⁱ⁾ C⁽ᵏ⁻ⁱ⁾) / W
//! ```

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::common::binomial;
use crate::eval::eval_homogeneous;
use crate::span::find_span;
use crate::{HomogeneousPoint, NurbsCurve, NurbsError, Vec2};

/// Control points of the homogeneous derivative curves.
///
/// Entry `p` holds the `n + 1 - p` control points of the `p`-th derivative,
/// a curve of degree `degree - p` over `knots[p..=m - p]`. Orders above the
/// degree are identically zero and are not stored.
pub(crate) fn derivative_control_points(
    knots: &[f64],
    pw: &[HomogeneousPoint],
    degree: usize,
    order: usize,
) -> Vec<Vec<HomogeneousPoint>> {
    let top = order.min(degree);
    let mut levels = Vec::with_capacity(top + 1);
    levels.push(pw.to_vec());
    for p in 1..=top {
        let scale = (degree - p + 1) as f64;
        let next: Vec<HomogeneousPoint> = levels[p - 1]
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let interval = knots[i + degree + 1] - knots[i + p];
                if interval == 0.0 {
                    HomogeneousPoint::ZERO
                } else {
                    (pair[1] - pair[0]) * (scale / interval)
                }
            })
            .collect();
        levels.push(next);
    }
    levels
}

/// The curve point and its derivatives up to `order` at `t`.
///
/// `levels` comes from [`derivative_control_points`] with at least
/// `order.min(degree)` derivative levels. Entry 0 of the result is the
/// point itself.
pub(crate) fn rational_derivatives(
    knots: &[f64],
    levels: &[Vec<HomogeneousPoint>],
    degree: usize,
    order: usize,
    t: f64,
) -> SmallVec<[Vec2; 4]> {
    let m = knots.len() - 1;
    let hders: SmallVec<[HomogeneousPoint; 4]> = (0..=order)
        .map(|p| {
            if p > degree {
                HomogeneousPoint::ZERO
            } else {
                eval_homogeneous(&knots[p..=m - p], &levels[p], degree - p, t)
            }
        })
        .collect();

    let weight = hders[0].w;
    let mut ders: SmallVec<[Vec2; 4]> = SmallVec::with_capacity(order + 1);
    ders.push(hders[0].project().to_vec2());
    for k in 1..=order {
        let mut v = hders[k].xy();
        for i in 1..=k {
            v -= (binomial(k, i) as f64 * hders[i].w) * ders[k - i];
        }
        if weight != 0.0 {
            v = v.div_exact(weight);
        }
        ders.push(v);
    }
    ders
}

impl NurbsCurve {
    /// The derivative of order `order` at parameter `t`.
    ///
    /// Order 0 is the curve point itself, as a vector. Orders above the
    /// degree of the underlying polynomial pieces still yield the (generally
    /// nonzero) derivatives of the rational curve.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperspline::{NurbsCurve, Point, Vec2};
    ///
    /// let line = NurbsCurve::new(
    ///     vec![0.0, 0.0, 1.0, 1.0],
    ///     vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
    ///     vec![1.0, 1.0],
    ///     0.0,
    /// )?;
    /// assert_eq!(line.deriv(1, 0.5)?, Vec2::new(10.0, 0.0));
    /// # Ok::<(), hyperspline::NurbsError>(())
    /// ```
    pub fn deriv(&self, order: usize, t: f64) -> Result<Vec2, NurbsError> {
        let ders = self.derivatives(order, t)?;
        Ok(ders[order])
    }

    /// The curve point followed by all derivatives up to `order` at `t`.
    ///
    /// Computing them together shares the work of the quotient rule, which
    /// needs every lower order anyway.
    pub fn derivatives(&self, order: usize, t: f64) -> Result<SmallVec<[Vec2; 4]>, NurbsError> {
        find_span(&self.knots, self.degree, t)?;
        let levels = derivative_control_points(&self.knots, &self.homogeneous, self.degree, order);
        Ok(rational_derivatives(
            &self.knots,
            &levels,
            self.degree,
            order,
            t,
        ))
    }
}
