// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by curve construction, evaluation and editing.

use core::fmt;

/// An error from a [`NurbsCurve`](crate::NurbsCurve) operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NurbsError {
    /// The knots, control points and weights do not describe a curve.
    InvalidCurve(CurveDefect),
    /// A curve parameter lies outside the knot range `[start, end]`.
    Domain {
        /// The offending parameter.
        t: f64,
        /// The first knot.
        start: f64,
        /// The last knot.
        end: f64,
    },
    /// An argument to an editing or sampling operation was rejected.
    InvalidArgument(ArgumentError),
}

/// Why a set of knots, control points and weights was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveDefect {
    /// There were no control points at all.
    NoControlPoints,
    /// The number of weights differs from the number of control points.
    WeightCount {
        /// Number of control points.
        points: usize,
        /// Number of weights.
        weights: usize,
    },
    /// The knot vector is too short for the control points; the implied
    /// degree would be less than 1.
    TooFewKnots {
        /// Number of control points.
        points: usize,
        /// Number of knots.
        knots: usize,
    },
    /// The knot vector is too long for the control points; the implied
    /// degree would exceed the number of control points minus one.
    TooManyKnots {
        /// Number of control points.
        points: usize,
        /// Number of knots.
        knots: usize,
    },
    /// The knot at `index` is smaller than its predecessor.
    DecreasingKnots {
        /// Position of the first out-of-order knot.
        index: usize,
    },
    /// A knot, coordinate or weight was NaN or infinite.
    NonFinite,
    /// The parameter range `[t_d, t_{n+1}]` has zero length.
    EmptyDomain,
}

/// Why an argument was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArgumentError {
    /// A knot to insert lies outside the valid parameter range
    /// `[t_d, t_{n+1}]`.
    ///
    /// For a clamped curve this is the whole knot range. An unclamped curve
    /// also rejects knots in `[t_0, t_d)` and `(t_{n+1}, t_m]`, although
    /// [`NurbsCurve::domain`](crate::NurbsCurve::domain) accepts those values
    /// for evaluation.
    KnotOutOfDomain {
        /// The rejected knot value.
        value: f64,
    },
    /// The knots to insert are not in non-decreasing order.
    UnsortedKnots,
    /// A sampling step was zero, negative or not finite.
    NonPositiveStep,
    /// A sampling step was so small that the samples could not be counted.
    StepTooSmall,
}

impl fmt::Display for NurbsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NurbsError::InvalidCurve(defect) => write!(f, "invalid curve: {defect}"),
            NurbsError::Domain { t, start, end } => {
                write!(f, "parameter {t} outside of curve domain [{start}, {end}]")
            }
            NurbsError::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
        }
    }
}

impl fmt::Display for CurveDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveDefect::NoControlPoints => write!(f, "no control points"),
            CurveDefect::WeightCount { points, weights } => {
                write!(f, "{points} control points but {weights} weights")
            }
            CurveDefect::TooFewKnots { points, knots } => write!(
                f,
                "{knots} knots are too few for {points} control points, need at least {}",
                points + 2
            ),
            CurveDefect::TooManyKnots { points, knots } => write!(
                f,
                "{knots} knots are too many for {points} control points, allow at most {}",
                2 * points
            ),
            CurveDefect::DecreasingKnots { index } => {
                write!(f, "knot {index} is smaller than the knot before it")
            }
            CurveDefect::NonFinite => write!(f, "non-finite knot, coordinate or weight"),
            CurveDefect::EmptyDomain => write!(f, "empty parameter domain"),
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::KnotOutOfDomain { value } => {
                write!(f, "knot {value} outside of curve domain")
            }
            ArgumentError::UnsortedKnots => write!(f, "knots to insert are not sorted"),
            ArgumentError::NonPositiveStep => write!(f, "step must be positive and finite"),
            ArgumentError::StepTooSmall => write!(f, "step is too small to sample the domain"),
        }
    }
}

impl From<CurveDefect> for NurbsError {
    fn from(defect: CurveDefect) -> Self {
        NurbsError::InvalidCurve(defect)
    }
}

impl From<ArgumentError> for NurbsError {
    fn from(err: ArgumentError) -> Self {
        NurbsError::InvalidArgument(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NurbsError {}

#[cfg(feature = "std")]
impl std::error::Error for CurveDefect {}

#[cfg(feature = "std")]
impl std::error::Error for ArgumentError {}
