// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projecting a point onto a curve.

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::deriv::{derivative_control_points, rational_derivatives};
use crate::{NurbsCurve, Point};

/// Tuning for [`NurbsCurve::project_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionOpts {
    /// Number of equal parameter steps in the coarse search.
    ///
    /// Both ends of the domain are sampled, so the curve is evaluated
    /// `samples + 1` times before Newton iteration starts.
    pub samples: usize,
    /// Stop once the candidate point is this close to the query point.
    pub tolerance: f64,
    /// Stop once a Newton step moves the point by less than this (estimated
    /// as the parameter change times the speed of the curve).
    pub step_tolerance: f64,
    /// Give up after this many Newton iterations.
    pub max_iterations: usize,
}

impl Default for ProjectionOpts {
    fn default() -> Self {
        ProjectionOpts {
            samples: 5000,
            tolerance: 0.002,
            step_tolerance: 0.002,
            max_iterations: 1000,
        }
    }
}

/// The result of [`NurbsCurve::project`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// The parameter of the closest point found.
    pub t: f64,
    /// The closest point found on the curve.
    pub point: Point,
    /// The squared distance from the query point to `point`.
    pub distance_sq: f64,
    /// Whether Newton iteration met one of its stopping criteria before the
    /// iteration limit.
    ///
    /// When this is `false`, `point` is the best candidate seen, which may be
    /// the coarse sample itself.
    pub converged: bool,
}

impl NurbsCurve {
    /// Find the point on the curve closest to `p`, with default options.
    ///
    /// See [`project_with`](Self::project_with).
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
    /// let hit = line.project(Point::new(4.0, 3.0));
    /// assert!(hit.converged);
    /// assert!(hit.point.distance(Point::new(4.0, 0.0)) < 0.01);
    /// # Ok::<(), hyperspline::NurbsError>(())
    /// ```
    pub fn project(&self, p: Point) -> Projection {
        self.project_with(p, &ProjectionOpts::default())
    }

    /// Find the point on the curve closest to `p`.
    ///
    /// A coarse search over evenly spaced parameters picks a starting value,
    /// which Newton iteration then refines on `C'(t)·(C(t) - p) = 0`. A step
    /// that leaves the domain wraps around on a closed curve (first and
    /// last control points coincide) and is clamped to the nearer end
    /// otherwise.
    ///
    /// The search is local: for query points roughly equidistant from
    /// several parts of the curve, the result is the closest point near the
    /// best coarse sample.
    pub fn project_with(&self, p: Point, opts: &ProjectionOpts) -> Projection {
        let (start, end) = self.domain();
        let len = end - start;
        let samples = opts.samples.max(1);

        let mut best_t = start;
        let mut best_dist = f64::INFINITY;
        for i in 0..=samples {
            let t = if i == samples {
                end
            } else {
                start + len * (i as f64 / samples as f64)
            };
            let dist = self.eval_in_domain(t).distance_squared(p);
            if dist < best_dist {
                best_dist = dist;
                best_t = t;
            }
        }

        let levels = derivative_control_points(&self.knots, &self.homogeneous, self.degree, 2);
        let ders_at = |t: f64| rational_derivatives(&self.knots, &levels, self.degree, 2, t);
        let closed = self.is_closed();
        let q = p.to_vec2();

        let mut t = best_t;
        let mut t_prev = f64::NAN;
        let mut ders = ders_at(t);
        let mut converged = false;
        for _ in 0..opts.max_iterations {
            let diff = ders[0] - q;
            let numerator = ders[1].dot(diff);
            let denominator = ders[2].dot(diff) + ders[1].hypot2();
            let mut t_next = t - numerator / denominator;
            if !t_next.is_finite() {
                // Flat spot: no Newton step is possible from here.
                t_next = t;
            }
            t_next = wrap_or_clamp(t_next, start, end, closed);
            if t_next == t || t_next == t_prev {
                converged = true;
                break;
            }
            let next = ders_at(t_next);
            let residual = (next[0] - q).hypot();
            let movement = (t_next - t).abs() * ders[1].hypot();
            t_prev = t;
            t = t_next;
            ders = next;
            let dist = residual * residual;
            if dist < best_dist {
                best_dist = dist;
                best_t = t;
            }
            if residual <= opts.tolerance || movement <= opts.step_tolerance {
                converged = true;
                break;
            }
        }

        if !converged {
            log::debug!(
                "projection of {p:?} did not converge after {} iterations, keeping t={best_t}",
                opts.max_iterations
            );
            t = best_t;
            ders = ders_at(t);
        }
        let point = ders[0].to_point();
        Projection {
            t,
            point,
            distance_sq: point.distance_squared(p),
            converged,
        }
    }

    /// Whether `p` lies within `tolerance` of the curve.
    pub fn is_point_on_curve(&self, p: Point, tolerance: f64) -> bool {
        self.project(p).distance_sq <= tolerance * tolerance
    }
}

/// Bring a parameter that left `[start, end]` back into it.
fn wrap_or_clamp(t: f64, start: f64, end: f64, closed: bool) -> f64 {
    if t >= start && t <= end {
        return t;
    }
    if closed {
        let len = end - start;
        let offset = (t - start) % len;
        if offset < 0.0 {
            start + offset + len
        } else {
            start + offset
        }
    } else if t < start {
        start
    } else {
        end
    }
}

#[cfg(test)]
mod tests {
    use super::{wrap_or_clamp, ProjectionOpts};
    use crate::{NurbsCurve, Point};

    fn wavy() -> NurbsCurve {
        NurbsCurve::new(
            vec![0.0, 0.0, 0.0, 0.0, 0.3, 0.7, 1.0, 1.0, 1.0, 1.0],
            vec![
                Point::new(0.0, 0.0),
                Point::new(20.0, 40.0),
                Point::new(50.0, -10.0),
                Point::new(80.0, 30.0),
                Point::new(100.0, 50.0),
                Point::new(120.0, 0.0),
            ],
            vec![1.0, 0.8, 1.2, 1.0, 2.0, 1.0],
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn on_curve_points_project_to_themselves() {
        let c = wavy();
        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            let p = c.eval(t).unwrap();
            let hit = c.project(p);
            assert!(hit.converged, "t={t}");
            assert!(hit.point.distance(p) <= 0.01, "t={t}: {:?} != {p:?}", hit.point);
        }
    }

    #[test]
    fn offset_point_projects_along_normal() {
        let c = wavy();
        let t = 0.45;
        let ders = c.derivatives(1, t).unwrap();
        let normal = ders[1].normalize();
        let normal = crate::Vec2::new(-normal.y, normal.x);
        let foot = ders[0].to_point();
        let hit = c.project(foot + normal * 0.5);
        // The foot of a short normal is the closest point nearby.
        assert!(hit.point.distance(foot) < 0.01, "{:?} != {foot:?}", hit.point);
        assert!((hit.distance_sq.sqrt() - 0.5).abs() < 0.01);
    }

    #[test]
    fn far_point_clamps_to_end() {
        let line = NurbsCurve::new(
            vec![0.0, 0.0, 1.0, 1.0],
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            vec![1.0, 1.0],
            0.0,
        )
        .unwrap();
        let hit = line.project(Point::new(25.0, 1.0));
        assert_eq!(hit.t, 1.0);
        assert_eq!(hit.point, Point::new(10.0, 0.0));
        assert!(hit.converged);
    }

    #[test]
    fn iteration_cap_reports_non_convergence() {
        let c = wavy();
        let opts = ProjectionOpts {
            samples: 4,
            tolerance: 0.0,
            step_tolerance: 0.0,
            max_iterations: 0,
        };
        let hit = c.project_with(Point::new(60.0, 60.0), &opts);
        assert!(!hit.converged);
        // Falls back to the best coarse sample, which is still on the curve.
        assert!(hit.point.distance(c.eval(hit.t).unwrap()) < 1e-9);
    }

    #[test]
    fn point_on_curve_check() {
        let c = wavy();
        let p = c.eval(0.6).unwrap();
        assert!(c.is_point_on_curve(p, 0.01));
        assert!(!c.is_point_on_curve(p + crate::Vec2::new(0.0, 200.0), 1.0));
    }

    #[test]
    fn wrapping() {
        assert_eq!(wrap_or_clamp(0.5, 0.0, 1.0, true), 0.5);
        assert!((wrap_or_clamp(1.25, 0.0, 1.0, true) - 0.25).abs() < 1e-12);
        assert!((wrap_or_clamp(-0.25, 0.0, 1.0, true) - 0.75).abs() < 1e-12);
        assert!((wrap_or_clamp(-2.25, 0.0, 1.0, true) - 0.75).abs() < 1e-12);
        assert_eq!(wrap_or_clamp(1.25, 0.0, 1.0, false), 1.0);
        assert_eq!(wrap_or_clamp(-0.25, 0.0, 1.0, false), 0.0);
    }

    #[test]
    fn closed_curve_projection() {
        // A full circle from four quarter arcs, closed at (1, 0).
        let c = NurbsCurve::circular_arc(Point::ORIGIN, 1.0, 0.0, core::f64::consts::TAU);
        assert!(c.is_closed());
        let hit = c.project(Point::new(1.5, -0.01));
        assert!(hit.converged);
        assert!((hit.point.distance(Point::ORIGIN) - 1.0).abs() < 1e-9);
        assert!(hit.point.distance(Point::new(1.0, -0.0066)) < 0.01);
    }
}
