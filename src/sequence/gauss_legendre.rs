//! Gauss-Legendre arithmetic-geometric mean iteration

use crate::decimal::{Context, Decimal};
use super::Recurrence;

/// Quadratically convergent: each step roughly doubles the
/// number of correct digits.
#[derive(Clone, Debug)]
pub struct GaussLegendre {
    a: Decimal,
    b: Decimal,
    t: Decimal,
    p: Decimal,
}

impl GaussLegendre {
    /// Starts from (a, b, t, p) = (1, 1/√2, 1/4, 1), evaluated in `ctx`.
    pub fn new(ctx: &Context) -> Self {
        let one = Decimal::from(1);
        GaussLegendre {
            a: one.clone(),
            b: ctx.div(&one, &ctx.sqrt(&Decimal::from(2))),
            t: ctx.div(&one, &Decimal::from(4)),
            p: one,
        }
    }
}

/// The iteration at `position` needs at least `2^position` digits;
/// with fewer, the step would only amplify rounding error.
fn has_precision_for(precision: usize, position: i64) -> bool {
    if position < 0 {
        return true;
    }
    let required = if position < 64 {1u64 << position} else {u64::MAX};
    (precision as u64) >= position as u64 && (precision as u64) >= required
}

impl Recurrence for GaussLegendre {
    fn next_element(&mut self, ctx: &Context, position: i64, previous: &Decimal) -> Decimal {
        if !has_precision_for(ctx.precision(), position) {
            tracing::trace!(position, precision = ctx.precision(), "Gauss-Legendre step skipped");
            return previous.clone();
        }

        let two = Decimal::from(2);
        let a = ctx.div(&ctx.add(&self.a, &self.b), &two);
        self.b = ctx.sqrt(&ctx.mul(&self.a, &self.b));
        let delta = ctx.sub(&self.a, &a);
        self.t = ctx.sub(&self.t, &ctx.mul(&self.p, &ctx.mul(&delta, &delta)));
        self.p = ctx.mul(&two, &self.p);
        self.a = a;

        let sum = ctx.add(&self.a, &self.b);
        ctx.div(&ctx.mul(&sum, &sum), &ctx.mul(&Decimal::from(4), &self.t))
    }

    fn footprint(&self) -> usize {
        self.a.footprint() + self.b.footprint() + self.t.footprint() + self.p.footprint()
    }
}
