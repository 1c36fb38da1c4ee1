//! Resumable sequences that converge to π.
//!
//! Every sequence starts before its first element (position -1,
//! value NaN) and moves forward one element per call to `advance`.
//! The four algorithms differ only in the `Recurrence` that produces
//! the next element from their private accumulators.

use std::fmt;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;

use crate::decimal::{Context, Decimal};
use crate::error::SetupError;

mod leibniz;
mod monte_carlo;
mod gauss_legendre;
mod chudnovsky;

pub use leibniz::*;
pub use monte_carlo::*;
pub use gauss_legendre::*;
pub use chudnovsky::*;

/// Generates the elements of an approximation sequence.
#[enum_dispatch]
pub trait Recurrence {
    /// Computes the element at `position`, which the sequence has just
    /// reached. `previous` is the element at `position - 1`, or NaN.
    /// Returning `previous` unchanged marks a skipped step.
    fn next_element(&mut self, ctx: &Context, position: i64, previous: &Decimal) -> Decimal;

    /// Bytes held by the accumulators of the recurrence
    fn footprint(&self) -> usize;
}

/// The closed set of algorithms
#[enum_dispatch(Recurrence)]
#[derive(Clone, Debug)]
pub enum Method {
    Leibniz,
    MonteCarlo,
    GaussLegendre,
    Chudnovsky,
}

/// Names the algorithm behind a sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    Leibniz,
    MonteCarlo,
    GaussLegendre,
    Chudnovsky,
}

impl SequenceKind {
    pub const ALL: [SequenceKind; 4] = [
        SequenceKind::Leibniz,
        SequenceKind::MonteCarlo,
        SequenceKind::GaussLegendre,
        SequenceKind::Chudnovsky,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SequenceKind::Leibniz => "Leibniz",
            SequenceKind::MonteCarlo => "MonteCarlo",
            SequenceKind::GaussLegendre => "GaussLegendre",
            SequenceKind::Chudnovsky => "Chudnovsky",
        }
    }

    /// The position at which the memory footprint is sampled.
    /// Slowly converging sequences are sampled further along.
    pub fn memory_position(&self) -> i64 {
        match self {
            SequenceKind::Leibniz => 128,
            SequenceKind::MonteCarlo => 1024,
            SequenceKind::GaussLegendre => 0,
            SequenceKind::Chudnovsky => 0,
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SequenceKind {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SequenceKind::ALL.iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| SetupError::unknown_sequence(s))
    }
}

/// A sequence of approximations to π that remembers where it is.
///
/// The position increases by exactly one per `advance`, whether or not
/// the recurrence had enough precision to do any work, and the sequence
/// can never be rewound.
#[derive(Clone, Debug)]
pub struct ApproximationSequence {
    kind: SequenceKind,
    method: Method,
    position: i64,
    value: Decimal,
}

impl ApproximationSequence {
    /// Creates a fresh sequence. Constants of the recurrence, like
    /// 1/√2 for Gauss-Legendre, are evaluated in `ctx`.
    pub fn new(kind: SequenceKind, ctx: &Context) -> Self {
        let method: Method = match kind {
            SequenceKind::Leibniz => Leibniz::new().into(),
            SequenceKind::MonteCarlo => MonteCarlo::new().into(),
            SequenceKind::GaussLegendre => GaussLegendre::new(ctx).into(),
            SequenceKind::Chudnovsky => Chudnovsky::new(ctx).into(),
        };
        Self::from_method(kind, method)
    }

    /// A Monte Carlo sequence drawing from a generator with the given seed.
    #[allow(unused)]
    pub fn monte_carlo(seed: u64) -> Self {
        Self::from_method(SequenceKind::MonteCarlo, MonteCarlo::with_seed(seed).into())
    }

    fn from_method(kind: SequenceKind, method: Method) -> Self {
        Self {
            kind,
            method,
            position: -1,
            value: Decimal::nan(),
        }
    }

    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    /// Position of the current element, -1 before the first advance
    pub fn current_position(&self) -> i64 {
        self.position
    }

    /// The current element, NaN before the first advance
    pub fn current_value(&self) -> &Decimal {
        &self.value
    }

    /// Moves to the next position and returns the element there.
    pub fn advance(&mut self, ctx: &Context) -> &Decimal {
        self.position += 1;
        self.value = self.method.next_element(ctx, self.position, &self.value);
        &self.value
    }

    /// Returns the element at `position`, advancing as far as needed.
    /// Positions behind the current one are no longer available.
    pub fn at(&mut self, ctx: &Context, position: i64) -> Option<&Decimal> {
        if position < self.position {
            return None;
        }

        while self.position < position {
            self.advance(ctx);
        }

        Some(&self.value)
    }

    /// Approximate size of the sequence state in bytes
    pub fn footprint(&self) -> usize {
        std::mem::size_of::<Self>() + self.value.footprint() + self.method.footprint()
    }
}
