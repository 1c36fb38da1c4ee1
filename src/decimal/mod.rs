//! Arbitrary-precision decimal numbers.
//!
//! A `Decimal` is either NaN or `(-1)^sign * coefficient * 10^exponent`
//! with an unbounded integer coefficient. Conversions from integers and
//! strings are exact; all rounding happens in a `Context`, which carries
//! the number of significant digits to keep.

use std::fmt;
use std::error::Error;
use std::ops::Neg;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

mod context;

pub use context::*;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Repr {
    NaN,
    Finite {
        negative: bool,
        coefficient: BigUint,
        exponent: i64,
    },
}

/// An arbitrary-precision decimal number
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal(Repr);

impl Decimal {
    /// The undefined value, used before a sequence is first advanced
    pub fn nan() -> Self {
        Decimal(Repr::NaN)
    }

    pub fn zero() -> Self {
        Self::from_parts(false, BigUint::zero(), 0)
    }

    /// Builds `(-1)^negative * coefficient * 10^exponent`.
    /// Zero is always stored without a sign.
    pub fn from_parts(negative: bool, coefficient: BigUint, exponent: i64) -> Self {
        let negative = negative && !coefficient.is_zero();
        Decimal(Repr::Finite { negative, coefficient, exponent })
    }

    pub(crate) fn parts(&self) -> Option<(bool, &BigUint, i64)> {
        match &self.0 {
            Repr::NaN => None,
            Repr::Finite { negative, coefficient, exponent } => Some((*negative, coefficient, *exponent)),
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self.0, Repr::NaN)
    }

    /// Decimal digits of the coefficient, most significant first.
    /// NaN has no digits.
    pub fn digits(&self) -> Vec<u8> {
        match self.parts() {
            None => Vec::new(),
            Some((_, coefficient, _)) => coefficient
                .to_str_radix(10)
                .bytes()
                .map(|b| b - b'0')
                .collect(),
        }
    }

    /// Nearest `f64`, for handing values to plotting and export.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Approximate number of bytes used to store this value,
    /// counting the 64-bit limbs of the coefficient.
    pub fn footprint(&self) -> usize {
        let limbs = self.parts()
            .map_or(0, |(_, c, _)| ((c.bits() + 63) / 64) as usize);
        std::mem::size_of::<Self>() + 8 * limbs
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        match self.0 {
            Repr::NaN => Decimal::nan(),
            Repr::Finite { negative, coefficient, exponent } => Decimal::from_parts(!negative, coefficient, exponent),
        }
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        -self.clone()
    }
}

impl From<BigUint> for Decimal {
    fn from(n: BigUint) -> Decimal {
        Decimal::from_parts(false, n, 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(n: BigInt) -> Decimal {
        Decimal::from_parts(n.sign() == Sign::Minus, n.magnitude().clone(), 0)
    }
}

impl From<u64> for Decimal {
    fn from(n: u64) -> Decimal {
        Decimal::from(BigUint::from(n))
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Decimal {
        Decimal::from_parts(n < 0, BigUint::from(n.unsigned_abs()), 0)
    }
}

impl From<i32> for Decimal {
    fn from(n: i32) -> Decimal {
        Decimal::from(n as i64)
    }
}

/// Error returned when a string is not a decimal number.
#[derive(Clone, PartialEq)]
pub struct ParseDecimalError {
    input: String,
}

impl ParseDecimalError {
    fn new(input: &str) -> Self {
        Self { input: input.to_owned() }
    }
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' is not a valid decimal number", self.input)
    }
}

impl fmt::Debug for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Error for ParseDecimalError {}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]` or `nan`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("nan") {
            return Ok(Decimal::nan());
        }

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (mantissa, exponent) = match body.find(|c| c == 'e' || c == 'E') {
            Some(i) => {
                let exponent = body[i+1..].parse::<i64>().map_err(|_| ParseDecimalError::new(s))?;
                (&body[..i], exponent)
            },
            None => (body, 0),
        };

        let (int, frac) = match mantissa.find('.') {
            Some(i) => (&mantissa[..i], &mantissa[i+1..]),
            None => (mantissa, ""),
        };

        let all_digits = int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit());
        if !all_digits || (int.is_empty() && frac.is_empty()) {
            return Err(ParseDecimalError::new(s));
        }

        let digits = format!("{}{}", int, frac);
        let coefficient = BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| ParseDecimalError::new(s))?;

        Ok(Decimal::from_parts(negative, coefficient, exponent - frac.len() as i64))
    }
}

impl fmt::Display for Decimal {
    /// Plain notation while the exponent is non-positive and the value
    /// is not too small, scientific notation (`1.2E+5`) otherwise.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (negative, coefficient, exponent) = match self.parts() {
            None => return write!(f, "NaN"),
            Some(parts) => parts,
        };

        let digits = coefficient.to_str_radix(10);
        let n = digits.len() as i64;
        let leftdigits = exponent + n;
        let dotplace = if exponent <= 0 && leftdigits > -6 { leftdigits } else { 1 };

        let (intpart, fracpart) = if dotplace <= 0 {
            ("0".to_owned(), format!(".{}{}", "0".repeat((-dotplace) as usize), digits))
        } else if dotplace >= n {
            (format!("{}{}", digits, "0".repeat((dotplace - n) as usize)), String::new())
        } else {
            let (i, r) = digits.split_at(dotplace as usize);
            (i.to_owned(), format!(".{}", r))
        };

        let exp = if leftdigits == dotplace {
            String::new()
        } else {
            format!("E{:+}", leftdigits - dotplace)
        };

        write!(f, "{}{}{}{}", if negative {"-"} else {""}, intpart, fracpart, exp)
    }
}
