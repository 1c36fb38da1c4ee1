//! Chudnovsky series,
//! 1/π = 12 Σ (-1)^k (6k)! (13591409 + 545140134 k) / [(3k)! (k!)^3 640320^(3k + 3/2)]

use num_bigint::BigInt;

use crate::constants::*;
use crate::decimal::{Context, Decimal};
use crate::special_functions::Factorial;
use super::Recurrence;

/// Each term adds about fourteen correct digits.
#[derive(Clone, Debug)]
pub struct Chudnovsky {
    partial_sum: Decimal,
    scale: Decimal,
}

impl Chudnovsky {
    /// Evaluates the prefactor C = 426880 √10005 once, in `ctx`.
    pub fn new(ctx: &Context) -> Self {
        let root = ctx.sqrt(&Decimal::from(CHUDNOVSKY_RADICAND));
        Chudnovsky {
            partial_sum: Decimal::zero(),
            scale: ctx.mul(&Decimal::from(CHUDNOVSKY_SCALE), &root),
        }
    }
}

/// The k-th term of the series, as an exact ratio of integers
fn term(k: u64) -> (BigInt, BigInt) {
    let numerator = (6 * k).factorial() * (CHUDNOVSKY_A + CHUDNOVSKY_B * k);
    let denominator = (3 * k).factorial() * k.factorial().pow(3);
    let denominator = BigInt::from(denominator) * BigInt::from(CHUDNOVSKY_C).pow(3 * k as u32);
    (BigInt::from(numerator), denominator)
}

impl Recurrence for Chudnovsky {
    fn next_element(&mut self, ctx: &Context, position: i64, previous: &Decimal) -> Decimal {
        if (ctx.precision() as i64) < CHUDNOVSKY_DIGITS_PER_TERM * position {
            tracing::trace!(position, precision = ctx.precision(), "Chudnovsky step skipped");
            return previous.clone();
        }

        let (numerator, denominator) = term(position as u64);
        let term = ctx.div(&Decimal::from(numerator), &Decimal::from(denominator));
        self.partial_sum = ctx.add(&self.partial_sum, &term);

        let inverse = ctx.div(&Decimal::from(1), &self.partial_sum);
        ctx.mul(&self.scale, &inverse)
    }

    fn footprint(&self) -> usize {
        self.partial_sum.footprint() + self.scale.footprint()
    }
}
