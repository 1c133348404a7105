// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A transformation that includes both scale and translation.

use core::ops::Mul;

use crate::{NurbsCurve, Point, Rect, Vec2};

/// A transformation including scaling and translation.
///
/// If the translation is `(x, y)` and the scale is `s`, then this
/// transformation represents this augmented matrix:
///
/// ```text
/// | s 0 x |
/// | 0 s y |
/// | 0 0 1 |
/// ```
///
/// Multiplication is defined to be consistent with matrix multiplication.
/// Therefore, `TranslateScale * Point` is defined but not the other way
/// around, and composition is not commutative:
/// `TranslateScale::scale(2.0) * TranslateScale::translate(Vec2::new(1.0, 0.0))`
/// has a translation of (2, 0), while
/// `TranslateScale::translate(Vec2::new(1.0, 0.0)) * TranslateScale::scale(2.0)`
/// has a translation of (1, 0).
///
/// Applied to a [`NurbsCurve`], the transform moves the control points only;
/// knots and weights are kept. Rational B-splines are invariant under
/// affine maps, so the transformed curve is exactly the transformed image.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslateScale {
    translation: Vec2,
    scale: f64,
}

impl TranslateScale {
    /// The identity transform.
    pub const IDENTITY: TranslateScale = TranslateScale::scale(1.0);

    /// Create a new transformation from translation and scale.
    #[inline]
    pub const fn new(translation: Vec2, scale: f64) -> TranslateScale {
        TranslateScale { translation, scale }
    }

    /// Create a new transformation with scale only.
    ///
    /// The scale is about the origin; to resize a curve in place, translate
    /// its center to the origin first and back afterwards.
    #[inline]
    pub const fn scale(s: f64) -> TranslateScale {
        TranslateScale::new(Vec2::ZERO, s)
    }

    /// Create a new transformation with translation only.
    #[inline]
    pub const fn translate(t: Vec2) -> TranslateScale {
        TranslateScale::new(t, 1.0)
    }

    /// Compute the inverse transform.
    ///
    /// Multiplying a transform with its inverse (either on the
    /// left or right) results in the identity transform
    /// (modulo floating point rounding errors).
    ///
    /// Produces NaN values when scale is zero.
    pub fn inverse(self) -> TranslateScale {
        let scale_recip = self.scale.recip();
        TranslateScale {
            translation: self.translation * -scale_recip,
            scale: scale_recip,
        }
    }
}

impl Default for TranslateScale {
    #[inline]
    fn default() -> TranslateScale {
        TranslateScale::IDENTITY
    }
}

impl Mul<Point> for TranslateScale {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        (self.scale * other.to_vec2()).to_point() + self.translation
    }
}

impl Mul for TranslateScale {
    type Output = TranslateScale;

    #[inline]
    fn mul(self, other: TranslateScale) -> TranslateScale {
        TranslateScale {
            translation: self.translation + self.scale * other.translation,
            scale: self.scale * other.scale,
        }
    }
}

impl Mul<Rect> for TranslateScale {
    type Output = Rect;

    #[inline]
    fn mul(self, other: Rect) -> Rect {
        let pt0 = self * Point::new(other.x0, other.y0);
        let pt1 = self * Point::new(other.x1, other.y1);
        (pt0, pt1).into()
    }
}

impl Mul<&NurbsCurve> for TranslateScale {
    type Output = NurbsCurve;

    fn mul(self, other: &NurbsCurve) -> NurbsCurve {
        other.map_control_points(|p| self * p)
    }
}

#[cfg(test)]
mod tests {
    use crate::{NurbsCurve, Point, Rect, TranslateScale, Vec2};

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn translate_scale() {
        let p = Point::new(3.0, 4.0);
        let ts = TranslateScale::new(Vec2::new(5.0, 6.0), 2.0);

        assert_near(ts * p, Point::new(11.0, 14.0));
    }

    #[test]
    fn conversions() {
        let p = Point::new(3.0, 4.0);
        let s = 2.0;
        let t = Vec2::new(5.0, 6.0);

        assert_near((s * p.to_vec2()).to_point(), TranslateScale::scale(s) * p);
        assert_near(p + t, TranslateScale::translate(t) * p);
        assert_near(
            TranslateScale::new(t, s) * p,
            (TranslateScale::translate(t) * TranslateScale::scale(s)) * p,
        );
    }

    #[test]
    fn inverse() {
        let p = Point::new(3.0, 4.0);
        let ts = TranslateScale::new(Vec2::new(5.0, 6.0), 2.0);

        assert_near(p, (ts * ts.inverse()) * p);
        assert_near(p, (ts.inverse() * ts) * p);
    }

    #[test]
    fn rect_with_negative_scale() {
        let r = TranslateScale::scale(-1.0) * Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r, Rect::new(-3.0, -4.0, -1.0, -2.0));
    }

    #[test]
    fn curve_image_is_transformed() {
        let curve = NurbsCurve::new(
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![(0.0, 0.0).into(), (1.0, 2.0).into(), (2.0, 0.0).into()],
            vec![1.0, 0.5, 1.0],
            0.0,
        )
        .unwrap();
        let ts = TranslateScale::new(Vec2::new(-3.0, 1.0), 1.5);
        let moved = ts * &curve;
        assert_eq!(moved.knots(), curve.knots());
        assert_eq!(moved.weights(), curve.weights());
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert_near(moved.eval(t).unwrap(), ts * curve.eval(t).unwrap());
        }
    }
}
