//! # Fraction Arithmetic
//!
//! Exact non-negative rationals in `[0, 1]` used for probability and
//! confidence weights.
//!
//! All arithmetic stays in non-negative integers: comparison is
//! cross-multiplication, never division, and numerators/denominators are
//! arbitrary-precision so products along a deep derivation chain cannot
//! overflow. No floating point, no reduction to lowest terms; equality is
//! semantic (`1/2 == 2/4`).

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConstraintDetail, CredenceError, ValidationCode};

/// An exact rational in `[0, 1]`.
///
/// Invariant: `denom >= 1` and `numer <= denom`. The invariant is established
/// by [`Fraction::new`] at the boundary and preserved by every operation,
/// since multiplying values in `[0, 1]` stays in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fraction {
    numer: BigUint,
    denom: BigUint,
}

impl Fraction {
    /// Validate and construct a fraction from raw boundary input.
    ///
    /// Fails when the denominator is zero or the numerator exceeds it.
    pub fn new(numer: u64, denom: u64) -> Result<Self, CredenceError> {
        if denom == 0 {
            return Err(out_of_range(numer, denom, "denominator must be >= 1"));
        }
        if numer > denom {
            return Err(out_of_range(numer, denom, "numerator must not exceed denominator"));
        }
        Ok(Self {
            numer: BigUint::from(numer),
            denom: BigUint::from(denom),
        })
    }

    /// `0/1`.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            numer: BigUint::zero(),
            denom: BigUint::one(),
        }
    }

    /// `1/1`.
    #[must_use]
    pub fn one() -> Self {
        Self {
            numer: BigUint::one(),
            denom: BigUint::one(),
        }
    }

    /// Componentwise product. Both operands are in `[0, 1]`, so the result is.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            numer: &self.numer * &other.numer,
            denom: &self.denom * &other.denom,
        }
    }

    /// Pessimistic combination: the smaller of the two values, expressed over
    /// the common denominator `self.denom * other.denom`.
    #[must_use]
    pub fn min_combine(&self, other: &Self) -> Self {
        let left = &self.numer * &other.denom;
        let right = &other.numer * &self.denom;
        Self {
            numer: left.min(right),
            denom: &self.denom * &other.denom,
        }
    }

    /// `self >= other` by cross-multiplication.
    #[must_use]
    pub fn ge(&self, other: &Self) -> bool {
        self.cmp(other) != Ordering::Less
    }

    /// `self <= other` by cross-multiplication.
    #[must_use]
    pub fn le(&self, other: &Self) -> bool {
        self.cmp(other) != Ordering::Greater
    }

    /// `self < other` by cross-multiplication.
    #[must_use]
    pub fn lt(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Less
    }

    /// The numerator.
    #[must_use]
    pub fn numer(&self) -> &BigUint {
        &self.numer
    }

    /// The denominator.
    #[must_use]
    pub fn denom(&self) -> &BigUint {
        &self.denom
    }
}

fn out_of_range(numer: u64, denom: u64, constraint: &str) -> CredenceError {
    CredenceError::Validation {
        code: ValidationCode::InvalidFraction,
        message: format!("fraction {numer}/{denom} is out of range: {constraint}"),
        detail: Some(ConstraintDetail {
            field: "fraction".to_string(),
            constraint: constraint.to_string(),
            value: format!("{numer}/{denom}"),
        }),
        replaced_by: None,
    }
}

// Semantic equality and ordering: a/b <= c/d  <=>  a*d <= c*b.
// Denominators are >= 1, so cross-multiplication preserves order.

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

impl FromStr for Fraction {
    type Err = CredenceError;

    /// Parse the `N/D` boundary form, e.g. `"9/10"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            CredenceError::validation(
                ValidationCode::InvalidFraction,
                format!("malformed fraction {s:?}: expected N/D"),
            )
        };
        let (n, d) = s.split_once('/').ok_or_else(malformed)?;
        let numer: u64 = n.trim().parse().map_err(|_| malformed())?;
        let denom: u64 = d.trim().parse().map_err(|_| malformed())?;
        Self::new(numer, denom)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: u64, d: u64) -> Fraction {
        Fraction::new(n, d).expect("valid fraction")
    }

    #[test]
    fn zero_denominator_rejected() {
        assert!(Fraction::new(1, 0).is_err());
    }

    #[test]
    fn numerator_above_denominator_rejected() {
        let err = Fraction::new(3, 2).expect_err("out of range");
        assert_eq!(err.validation_code(), Some(ValidationCode::InvalidFraction));
    }

    #[test]
    fn equality_is_semantic() {
        assert_eq!(frac(1, 2), frac(2, 4));
        assert_eq!(frac(0, 1), frac(0, 7));
        assert_ne!(frac(1, 2), frac(2, 3));
    }

    #[test]
    fn ordering_by_cross_multiplication() {
        assert!(frac(3, 4).lt(&frac(9, 10)));
        assert!(frac(9, 10).ge(&frac(9, 10)));
        assert!(frac(1, 3).le(&frac(1, 2)));
        // 729/1000 < 3/4 because 729*4 = 2916 < 3000 = 3*1000
        assert!(frac(729, 1000).lt(&frac(3, 4)));
    }

    #[test]
    fn multiply_accumulates_exactly() {
        let p = frac(9, 10).multiply(&frac(9, 10));
        assert_eq!(p, frac(81, 100));
        let p = p.multiply(&frac(9, 10));
        assert_eq!(p, frac(729, 1000));
    }

    #[test]
    fn multiply_stays_in_unit_interval() {
        let p = frac(1, 1).multiply(&frac(1, 1));
        assert_eq!(p, Fraction::one());
        let q = frac(0, 1).multiply(&frac(9, 10));
        assert_eq!(q, Fraction::zero());
    }

    #[test]
    fn min_combine_picks_smaller_value() {
        assert_eq!(frac(80, 100).min_combine(&frac(95, 100)), frac(80, 100));
        assert_eq!(frac(1, 1).min_combine(&frac(3, 4)), frac(3, 4));
        // Identical values: either cross-product works
        assert_eq!(frac(1, 2).min_combine(&frac(2, 4)), frac(1, 2));
    }

    #[test]
    fn min_combine_is_non_increasing() {
        let a = frac(7, 8);
        let b = frac(2, 3);
        let combined = a.min_combine(&b);
        assert!(combined.le(&a));
        assert!(combined.le(&b));
    }

    #[test]
    fn deep_products_do_not_overflow() {
        let step = frac(9, 10);
        let mut acc = Fraction::one();
        for _ in 0..200 {
            acc = acc.multiply(&step);
        }
        // 9^200 / 10^200: far beyond u128, still exact
        assert!(acc.lt(&frac(1, 1_000_000)));
        assert!(acc.ge(&Fraction::zero()));
    }

    #[test]
    fn parse_boundary_form() {
        assert_eq!("9/10".parse::<Fraction>().expect("parse"), frac(9, 10));
        assert_eq!(" 1 / 1 ".trim().parse::<Fraction>().expect("parse"), frac(1, 1));
        assert!("ten/9".parse::<Fraction>().is_err());
        assert!("9".parse::<Fraction>().is_err());
        assert!("5/4".parse::<Fraction>().is_err());
    }

    #[test]
    fn display_roundtrip() {
        let f = frac(729, 1000);
        assert_eq!(f.to_string(), "729/1000");
        assert_eq!(f.to_string().parse::<Fraction>().expect("parse"), f);
    }
}
