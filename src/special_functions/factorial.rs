//! Implements the factorial, exactly

use num_bigint::BigUint;
use num_traits::One;

pub trait Factorial {
    /// Evaluates the factorial function n! without rounding
    fn factorial(&self) -> BigUint;
}

impl Factorial for u64 {
    fn factorial(&self) -> BigUint {
        (2..=*self).fold(BigUint::one(), |acc, i| acc * i)
    }
}
