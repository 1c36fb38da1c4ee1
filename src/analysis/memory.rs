//! Memory held by a sequence as a function of the working precision

use serde::Serialize;

use crate::decimal::Context;
use crate::error::SetupError;
use crate::sequence::{ApproximationSequence, SequenceKind};
use crate::spacing::linspace_int;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryPoint {
    pub precision: usize,
    pub bytes: usize,
}

/// Footprint of a fresh sequence of the given kind, computed at
/// `precision` digits and advanced to its sampling position.
pub fn footprint_at(kind: SequenceKind, precision: usize) -> Result<usize, SetupError> {
    let ctx = Context::new(precision)?;
    let mut sequence = ApproximationSequence::new(kind, &ctx);
    sequence.at(&ctx, kind.memory_position());
    Ok(sequence.footprint())
}

/// Footprints at `min(samples, digits)` precisions evenly spaced
/// between 1 and `digits`.
pub fn memory_usage(kind: SequenceKind, digits: usize, samples: usize) -> Result<Vec<MemoryPoint>, SetupError> {
    if digits == 0 {
        return Err(SetupError::NonPositivePrecision);
    }

    linspace_int(1, digits as i64, samples.min(digits))?
        .into_iter()
        .map(|p| {
            let precision = p as usize;
            footprint_at(kind, precision).map(|bytes| MemoryPoint { precision, bytes })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_grows_with_digits() {
        for kind in SequenceKind::ALL.iter() {
            let points = memory_usage(*kind, 400, 4).unwrap();
            println!("{}: {:?}", kind, points);
            assert_eq!(points.len(), 4);
            assert_eq!(points[0].precision, 1);
            assert_eq!(points[3].precision, 400);
            assert!(points.windows(2).all(|w| w[1].bytes >= w[0].bytes));
        }
    }

    #[test]
    fn samples_limited_by_digits() {
        let points = memory_usage(SequenceKind::Chudnovsky, 3, 10).unwrap();
        let precisions: Vec<usize> = points.iter().map(|p| p.precision).collect();
        assert_eq!(precisions, vec![1, 2, 3]);
        assert_eq!(memory_usage(SequenceKind::Leibniz, 0, 10), Err(SetupError::NonPositivePrecision));
        assert_eq!(memory_usage(SequenceKind::Leibniz, 10, 0), Err(SetupError::too_few_samples(1, 0)));
    }
}
