//! Rounded arithmetic at a fixed number of significant digits

use std::cmp::Ordering;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

use crate::error::SetupError;
use super::Decimal;

/// Carries the precision, in significant decimal digits, used by
/// every rounded operation.
///
/// Each operation computes the exact result and rounds it once,
/// half to even.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context {
    precision: usize,
}

impl Context {
    /// Fails if `precision` is zero.
    pub fn new(precision: usize) -> Result<Self, SetupError> {
        if precision == 0 {
            Err(SetupError::NonPositivePrecision)
        } else {
            Ok(Context { precision })
        }
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn add(&self, a: &Decimal, b: &Decimal) -> Decimal {
        let ((na, ca, ea), (nb, cb, eb)) = match (a.parts(), b.parts()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Decimal::nan(),
        };

        let exponent = ea.min(eb);
        let ca = ca * pow10((ea - exponent) as usize);
        let cb = cb * pow10((eb - exponent) as usize);

        let (negative, coefficient) = if na == nb {
            (na, ca + cb)
        } else if ca >= cb {
            (na, ca - cb)
        } else {
            (nb, cb - ca)
        };

        self.finish(negative, coefficient, exponent, false)
    }

    pub fn sub(&self, a: &Decimal, b: &Decimal) -> Decimal {
        self.add(a, &-b)
    }

    pub fn mul(&self, a: &Decimal, b: &Decimal) -> Decimal {
        match (a.parts(), b.parts()) {
            (Some((na, ca, ea)), Some((nb, cb, eb))) => self.finish(na != nb, ca * cb, ea + eb, false),
            _ => Decimal::nan(),
        }
    }

    /// Division by zero yields NaN.
    pub fn div(&self, a: &Decimal, b: &Decimal) -> Decimal {
        let ((na, ca, ea), (nb, cb, eb)) = match (a.parts(), b.parts()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Decimal::nan(),
        };

        if cb.is_zero() {
            return Decimal::nan();
        }

        let negative = na != nb;
        let ideal = ea - eb;

        if ca.is_zero() {
            return Decimal::from_parts(negative, BigUint::zero(), ideal);
        }

        // scale the dividend so the quotient has at least precision + 1 digits
        let shift = digit_count(cb) as i64 - digit_count(ca) as i64 + self.precision as i64 + 1;
        let (quotient, remainder) = if shift >= 0 {
            (ca * pow10(shift as usize)).div_rem(cb)
        } else {
            ca.div_rem(&(cb * pow10((-shift) as usize)))
        };
        let exponent = ideal - shift;

        if remainder.is_zero() {
            let (quotient, exponent) = strip_zeros(quotient, exponent, ideal);
            self.finish(negative, quotient, exponent, false)
        } else {
            self.finish(negative, quotient, exponent, true)
        }
    }

    /// The square root of a negative number is NaN.
    pub fn sqrt(&self, a: &Decimal) -> Decimal {
        let (negative, c, e) = match a.parts() {
            Some(parts) => parts,
            None => return Decimal::nan(),
        };

        if c.is_zero() {
            return Decimal::from_parts(false, BigUint::zero(), e.div_euclid(2));
        }

        if negative {
            return Decimal::nan();
        }

        // radicand needs 2 (precision + 1) digits and an even exponent
        let mut shift = (2 * (self.precision + 1)).saturating_sub(digit_count(c)) as i64;
        if (e - shift).rem_euclid(2) != 0 {
            shift += 1;
        }

        let radicand = c * pow10(shift as usize);
        let root = radicand.sqrt();
        let exponent = (e - shift) / 2;

        if &root * &root == radicand {
            let (root, exponent) = strip_zeros(root, exponent, e.div_euclid(2));
            self.finish(false, root, exponent, false)
        } else {
            self.finish(false, root, exponent, true)
        }
    }

    /// Rounds `coefficient * 10^exponent` to the working precision,
    /// half to even. `inexact` flags a nonzero tail that has already
    /// been truncated away, which breaks ties upwards.
    fn finish(&self, negative: bool, coefficient: BigUint, exponent: i64, inexact: bool) -> Decimal {
        let n = digit_count(&coefficient);
        if n <= self.precision {
            return Decimal::from_parts(negative, coefficient, exponent);
        }

        let dropped = n - self.precision;
        let unit = pow10(dropped);
        let (mut kept, rest) = coefficient.div_rem(&unit);

        let round_up = match (&rest * 2u32).cmp(&unit) {
            Ordering::Greater => true,
            Ordering::Equal => inexact || kept.is_odd(),
            Ordering::Less => false,
        };

        let mut exponent = exponent + dropped as i64;
        if round_up {
            kept += 1u32;
            if digit_count(&kept) > self.precision {
                kept /= 10u32;
                exponent += 1;
            }
        }

        Decimal::from_parts(negative, kept, exponent)
    }
}

fn pow10(n: usize) -> BigUint {
    BigUint::from(10u32).pow(n as u32)
}

fn digit_count(n: &BigUint) -> usize {
    if n.is_zero() {
        1
    } else {
        n.to_str_radix(10).len()
    }
}

/// Removes trailing zeros from an exact result, but never raises
/// the exponent above `ideal`.
fn strip_zeros(mut coefficient: BigUint, mut exponent: i64, ideal: i64) -> (BigUint, i64) {
    let ten = BigUint::from(10u32);
    while exponent < ideal && !coefficient.is_zero() {
        let (q, r) = coefficient.div_rem(&ten);
        if !r.is_zero() {
            break;
        }
        coefficient = q;
        exponent += 1;
    }
    (coefficient, exponent)
}
