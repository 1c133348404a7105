// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weighted points lifted into homogeneous coordinates.
//!
//! A rational curve in the plane is a polynomial curve in 3D followed by a
//! perspective division. Lifting every control point `(x, y)` with weight `w`
//! to `(x·w, y·w, w)` lets the rational curve reuse the plain B-spline
//! recurrences; the result is projected back with [`HomogeneousPoint::project`].

use alloc::vec::Vec;
use core::ops::{Add, Mul, Sub};

use crate::{Point, Vec2};

/// A control point in homogeneous coordinates, `(x·w, y·w, w)`.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HomogeneousPoint {
    /// The weighted x coordinate.
    pub x: f64,
    /// The weighted y coordinate.
    pub y: f64,
    /// The weight.
    pub w: f64,
}

impl HomogeneousPoint {
    /// All components zero.
    pub const ZERO: HomogeneousPoint = HomogeneousPoint::new(0., 0., 0.);

    /// Create a homogeneous point from its raw components.
    #[inline(always)]
    pub const fn new(x: f64, y: f64, w: f64) -> Self {
        HomogeneousPoint { x, y, w }
    }

    /// Lift a point with the given weight.
    #[inline]
    pub fn lift(p: Point, w: f64) -> Self {
        HomogeneousPoint::new(p.x * w, p.y * w, w)
    }

    /// The weighted coordinates, without dividing by the weight.
    #[inline(always)]
    pub const fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Project back into the plane.
    ///
    /// A zero weight has no projection; in that case the weighted
    /// coordinates are returned as they are.
    #[inline]
    pub fn project(self) -> Point {
        if self.w == 0.0 {
            Point::new(self.x, self.y)
        } else {
            self.xy().div_exact(self.w).to_point()
        }
    }

    /// Linearly interpolate between two homogeneous points.
    #[inline]
    pub fn lerp(self, other: HomogeneousPoint, t: f64) -> HomogeneousPoint {
        self * (1.0 - t) + other * t
    }
}

impl Add for HomogeneousPoint {
    type Output = HomogeneousPoint;

    #[inline]
    fn add(self, other: HomogeneousPoint) -> HomogeneousPoint {
        HomogeneousPoint::new(self.x + other.x, self.y + other.y, self.w + other.w)
    }
}

impl Sub for HomogeneousPoint {
    type Output = HomogeneousPoint;

    #[inline]
    fn sub(self, other: HomogeneousPoint) -> HomogeneousPoint {
        HomogeneousPoint::new(self.x - other.x, self.y - other.y, self.w - other.w)
    }
}

impl Mul<f64> for HomogeneousPoint {
    type Output = HomogeneousPoint;

    #[inline]
    fn mul(self, s: f64) -> HomogeneousPoint {
        HomogeneousPoint::new(self.x * s, self.y * s, self.w * s)
    }
}

impl Mul<HomogeneousPoint> for f64 {
    type Output = HomogeneousPoint;

    #[inline]
    fn mul(self, p: HomogeneousPoint) -> HomogeneousPoint {
        p * self
    }
}

/// Lift every control point with its weight.
///
/// The slices must have equal length.
pub(crate) fn lift_all(points: &[Point], weights: &[f64]) -> Vec<HomogeneousPoint> {
    points
        .iter()
        .zip(weights)
        .map(|(&p, &w)| HomogeneousPoint::lift(p, w))
        .collect()
}

/// Split homogeneous points back into control points and weights.
pub(crate) fn project_all(pw: &[HomogeneousPoint]) -> (Vec<Point>, Vec<f64>) {
    pw.iter().map(|hp| (hp.project(), hp.w)).unzip()
}
