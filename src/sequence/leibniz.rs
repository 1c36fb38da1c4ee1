//! Leibniz series, π/4 = 1 - 1/3 + 1/5 - ...

use crate::decimal::{Context, Decimal};
use super::Recurrence;

/// Partial sums of the Leibniz series. The error falls off as 1/n,
/// which makes this the slow baseline of the comparison.
#[derive(Clone, Debug)]
pub struct Leibniz {
    partial_sum: Decimal,
}

impl Leibniz {
    pub fn new() -> Self {
        Leibniz {
            partial_sum: Decimal::zero(),
        }
    }
}

impl Default for Leibniz {
    fn default() -> Self {
        Self::new()
    }
}

impl Recurrence for Leibniz {
    fn next_element(&mut self, ctx: &Context, position: i64, _previous: &Decimal) -> Decimal {
        let sign = if position % 2 == 1 {-1} else {1};
        let term = ctx.div(&Decimal::from(sign), &Decimal::from(2 * position + 1));
        self.partial_sum = ctx.add(&self.partial_sum, &term);
        ctx.mul(&Decimal::from(4), &self.partial_sum)
    }

    fn footprint(&self) -> usize {
        self.partial_sum.footprint()
    }
}
