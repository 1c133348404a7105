// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("hyperspline requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn ceil(self) -> Self => ceil;
    fn hypot(self, other: Self) -> Self => hypot;
    fn sin_cos(self) -> (Self, Self) => sincos;
    fn sqrt(self) -> Self => sqrt;
}

/// The binomial coefficient "`n` choose `k`".
///
/// Computed exactly in integer arithmetic with the multiplicative formula;
/// every intermediate product is itself a binomial coefficient times a small
/// factor, so this does not overflow for the derivative orders a curve can
/// have in practice (`n` up to several dozen).
///
/// Returns 0 when `k > n`.
///
/// # Examples
///
/// ```
/// use hyperspline::common::binomial;
///
/// assert_eq!(binomial(4, 2), 6);
/// assert_eq!(binomial(10, 0), 1);
/// assert_eq!(binomial(3, 5), 0);
/// ```
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        // Exact: result * (n - i) is divisible by (i + 1) at this point.
        result = result * (n - i) as u64 / (i + 1) as u64;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::binomial;

    #[test]
    fn pascal_rows() {
        let row: Vec<u64> = (0..=6).map(|k| binomial(6, k)).collect();
        assert_eq!(row, [1, 6, 15, 20, 15, 6, 1]);
        for n in 1..20 {
            for k in 1..n {
                assert_eq!(
                    binomial(n, k),
                    binomial(n - 1, k - 1) + binomial(n - 1, k),
                    "C({n}, {k})"
                );
            }
        }
    }

    #[test]
    fn symmetric() {
        assert_eq!(binomial(30, 7), binomial(30, 23));
        assert_eq!(binomial(0, 0), 1);
    }
}
