// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locating the knot span that governs a parameter value.

use crate::NurbsError;

/// Check that `t` lies in `[knots[0], knots[m]]` and find its span.
///
/// `knots` must hold at least `2 * degree + 2` entries; every curve
/// constructor upholds this.
pub(crate) fn find_span(knots: &[f64], degree: usize, t: f64) -> Result<usize, NurbsError> {
    let start = knots[0];
    let end = knots[knots.len() - 1];
    // Written so that NaN is rejected.
    if !(t >= start && t <= end) {
        return Err(NurbsError::Domain { t, start, end });
    }
    Ok(span_in_range(knots, degree, t))
}

/// Find `j` in `[degree, n]` with `knots[j] <= t < knots[j + 1]`.
///
/// Parameters at or past `knots[n + 1]` map to the last span `n`, and
/// parameters before `knots[degree + 1]` map to the first span `degree`.
/// The result therefore always addresses `degree + 1` valid control points,
/// whatever the multiplicity of the end knots.
pub(crate) fn span_in_range(knots: &[f64], degree: usize, t: f64) -> usize {
    let n = knots.len() - degree - 2;
    if t >= knots[n + 1] {
        return n;
    }
    if t < knots[degree + 1] {
        return degree;
    }
    // Invariant: knots[low] <= t < knots[high].
    let mut low = degree;
    let mut high = n + 1;
    while high - low > 1 {
        let mid = (low + high) / 2;
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
    }
    low
}

#[cfg(test)]
mod tests {
    use super::{find_span, span_in_range};
    use crate::NurbsError;

    const QUADRATIC: [f64; 8] = [0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];

    #[test]
    fn interior_spans() {
        assert_eq!(span_in_range(&QUADRATIC, 2, 0.0), 2);
        assert_eq!(span_in_range(&QUADRATIC, 2, 0.5), 2);
        assert_eq!(span_in_range(&QUADRATIC, 2, 1.0), 3);
        assert_eq!(span_in_range(&QUADRATIC, 2, 2.5), 4);
    }

    #[test]
    fn last_knot_maps_to_last_span() {
        // 5 control points, degree 2: spans 2..=4.
        let span = find_span(&QUADRATIC, 2, 3.0).unwrap();
        assert_eq!(span, 4);
        assert!(span < 5, "span would overflow the control points");
    }

    #[test]
    fn unclamped_end_stays_in_range() {
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        // 5 control points, degree 2: valid spans are 2..=4.
        assert_eq!(find_span(&knots, 2, 7.0).unwrap(), 4);
        assert_eq!(find_span(&knots, 2, 0.0).unwrap(), 2);
        assert_eq!(find_span(&knots, 2, 3.5).unwrap(), 3);
    }

    #[test]
    fn repeated_interior_knot() {
        let knots = [0.0, 0.0, 0.0, 0.5, 0.5, 1.0, 1.0, 1.0];
        assert_eq!(span_in_range(&knots, 2, 0.25), 2);
        assert_eq!(span_in_range(&knots, 2, 0.5), 4);
    }

    #[test]
    fn out_of_domain() {
        assert_eq!(
            find_span(&QUADRATIC, 2, 3.5),
            Err(NurbsError::Domain {
                t: 3.5,
                start: 0.0,
                end: 3.0
            })
        );
        assert!(find_span(&QUADRATIC, 2, -0.1).is_err());
        assert!(find_span(&QUADRATIC, 2, f64::NAN).is_err());
    }
}
