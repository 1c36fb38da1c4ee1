//! Digits of π obtained at logarithmically spaced positions

use serde::Serialize;

use crate::decimal::{Context, Decimal};
use crate::error::SetupError;
use crate::sequence::{ApproximationSequence, SequenceKind};
use crate::spacing::logspace_int;
use super::{first_mismatch, matching_digits};

/// Largest power of ten that may be used as the last sample position
pub const MAX_CONVERGENCE_EXPONENT: i64 = 12;

/// Agreement between a sequence element and the reference
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConvergencePoint {
    pub position: i64,
    pub matching: usize,
    /// Correct digits after the decimal point, or `None` if every
    /// digit of the reference was matched
    pub correct_decimals: Option<i64>,
}

impl ConvergencePoint {
    /// Moves `sequence` forward to `position` and compares the element
    /// there against `reference`. Returns `None` if the sequence is
    /// already past `position`.
    pub fn measure(sequence: &mut ApproximationSequence, ctx: &Context, reference: &Decimal, position: i64) -> Option<Self> {
        let value = sequence.at(ctx, position)?;
        Some(ConvergencePoint {
            position,
            matching: matching_digits(value, reference),
            correct_decimals: correct_decimals(value, reference),
        })
    }
}

/// A candidate that runs out of digits before the reference does is
/// only correct up to its own length.
fn correct_decimals(value: &Decimal, reference: &Decimal) -> Option<i64> {
    match first_mismatch(value, reference) {
        Some(m) => Some(m.index as i64 - 1),
        None if value.digits().len() < reference.digits().len() => Some(value.digits().len() as i64 - 1),
        None => None,
    }
}

/// Sample positions `10^x` for exponents evenly spaced over `[0, stop]`
pub fn sample_positions(stop: i64, samples: usize) -> Result<Vec<i64>, SetupError> {
    if stop < 1 || stop > MAX_CONVERGENCE_EXPONENT {
        return Err(SetupError::out_of_range("stop", 1, MAX_CONVERGENCE_EXPONENT));
    }

    let v = logspace_int(0.0, stop as f64, samples, 10.0)?
        .into_iter()
        .map(|p| p as i64)
        .collect();
    Ok(v)
}

/// Measures a fresh sequence of the given kind at each of `positions`,
/// which must be non-decreasing.
pub fn convergence<'a>(kind: SequenceKind, ctx: &'a Context, reference: &'a Decimal, positions: &'a [i64]) -> impl Iterator<Item = ConvergencePoint> + 'a {
    let mut sequence = ApproximationSequence::new(kind, ctx);
    positions.iter()
        .filter_map(move |&p| ConvergencePoint::measure(&mut sequence, ctx, reference, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference;

    #[test]
    fn positions() {
        assert_eq!(sample_positions(3, 5).unwrap(), vec![1, 5, 31, 177, 1000]);
        assert_eq!(sample_positions(0, 5), Err(SetupError::out_of_range("stop", 1, 12)));
        assert_eq!(sample_positions(13, 5), Err(SetupError::out_of_range("stop", 1, 12)));
        assert_eq!(sample_positions(4, 1), Err(SetupError::too_few_samples(2, 1)));
    }

    #[test]
    fn leibniz_gains_digits_slowly() {
        let ctx = Context::new(50).unwrap();
        let positions = sample_positions(3, 4).unwrap();
        let points: Vec<_> = convergence(SequenceKind::Leibniz, &ctx, reference::pi(), &positions).collect();
        for p in points.iter() {
            println!("{:?}", p);
        }
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].position, 1);
        assert_eq!(points[0].correct_decimals, Some(-1));
        assert!(points[3].matching >= 3);
        assert!(points.iter().all(|p| p.correct_decimals == Some(p.matching as i64 - 1)));
    }

    #[test]
    fn short_candidates_are_not_fully_correct() {
        let pi = reference::pi();
        let d = |s: &str| s.parse::<Decimal>().unwrap();
        assert_eq!(correct_decimals(&d("3"), pi), Some(0));
        assert_eq!(correct_decimals(&d("3.14"), pi), Some(2));
        assert_eq!(correct_decimals(&d("3.2"), pi), Some(0));
        assert_eq!(correct_decimals(&d("4"), pi), Some(-1));
        assert_eq!(correct_decimals(pi, pi), None);
        assert_eq!(correct_decimals(&Decimal::nan(), pi), Some(-1));
    }

    #[test]
    fn repeated_positions_are_reused() {
        let ctx = Context::new(30).unwrap();
        let points: Vec<_> = convergence(SequenceKind::Chudnovsky, &ctx, reference::pi(), &[0, 0, 1, 1]).collect();
        println!("{:?}", points);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], points[1]);
        assert_eq!(points[2], points[3]);
        assert!(points[2].matching > points[0].matching);
    }
}
