// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rational B-spline curves for drawing the edges of a hypergraph.
//!
//! A hyperedge connects any number of nodes, and is drawn as a smooth curve
//! that the user can reshape by dragging control points. This crate holds the
//! geometry of such a curve: a non-uniform rational B-spline ([`NurbsCurve`])
//! in the plane, with evaluation, derivatives, knot refinement, projection of
//! a point onto the curve, and a few utilities for drawing and editing.
//!
//! The hypergraph itself, undo history, rendering and persistence belong to
//! the application; it hands knots, control points and weights to this crate
//! and asks questions about the resulting curve.
//!
//! # Examples
//!
//! Evaluating a curve and projecting a point onto it:
//!
//! ```
//! use hyperspline::{NurbsCurve, Point};
//!
//! let curve = NurbsCurve::new(
//!     vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
//!     vec![Point::new(0.0, 0.0), Point::new(50.0, 100.0), Point::new(100.0, 0.0)],
//!     vec![1.0, 0.5, 1.0],
//!     5.0,
//! )?;
//!
//! let apex = curve.eval(0.5)?;
//! assert!(apex.distance(Point::new(50.0, 100.0 / 3.0)) < 1e-9);
//!
//! let hit = curve.project(Point::new(50.0, 40.0));
//! assert!(hit.converged);
//! assert!(hit.point.distance(apex) < 0.01);
//! # Ok::<(), hyperspline::NurbsError>(())
//! ```
//!
//! Inserting knots gives more control points to drag without moving the curve:
//!
//! ```
//! use hyperspline::{NurbsCurve, Point};
//!
//! let mut curve = NurbsCurve::circular_arc(Point::ORIGIN, 10.0, 0.0, 1.5);
//! let before = curve.eval(0.3)?;
//! curve.refine_knots(&[0.25, 0.5, 0.75])?;
//! assert_eq!(curve.control_points().len(), 6);
//! assert!(curve.eval(0.3)?.distance(before) < 1e-9);
//! # Ok::<(), hyperspline::NurbsError>(())
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. This crate still uses the `alloc` crate regardless.
//!
//! The `serde` and `schemars` features derive their traits for the small
//! value types, and `mint` adds conversions for [`Point`] and [`Vec2`].
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::many_single_char_names,
    reason = "knot and control point indices follow the usual notation"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("hyperspline requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

pub mod common;
mod curve;
mod deriv;
mod error;
mod eval;
mod flatten;
mod homogeneous;
mod nearest;
mod point;
mod rect;
mod refine;
mod span;
mod translate_scale;
mod vec2;

pub use crate::curve::*;
pub use crate::error::*;
pub use crate::flatten::*;
pub use crate::homogeneous::*;
pub use crate::nearest::*;
pub use crate::point::*;
pub use crate::rect::*;
pub use crate::translate_scale::*;
pub use crate::vec2::*;
