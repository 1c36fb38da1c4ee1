//! Timing how long a sequence takes to reach a number of correct digits

use std::time::{Duration, Instant};

use crate::constants::*;
use crate::decimal::{Context, Decimal};
use crate::sequence::ApproximationSequence;
use super::matching_digits;

/// Progress of a measurement
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HarnessState {
    NotStarted,
    Advancing,
    /// The target number of digits was reached
    Converged,
    /// The safety bound on the position was reached first
    Exhausted,
}

/// Result of `digits_correct_after`
#[derive(Clone, Debug)]
pub struct Measurement {
    pub state: HarnessState,
    /// Wall-clock time spent inside `advance`
    pub elapsed: Duration,
    /// Number of advances made by this measurement
    pub steps: u64,
    /// Digits of the final element that agree with the reference
    pub matching: usize,
}

/// Does `value` agree with `reference` to at least `target` digits?
/// An exact value shorter than `target` never does, even if all of
/// its digits are correct.
fn has_converged(value: &Decimal, reference: &Decimal, target: usize) -> bool {
    !value.is_nan() && matching_digits(value, reference) >= target
}

/// Advances `sequence` until its current element agrees with `reference`
/// to `target_digits` digits, or until its position reaches `bound`.
///
/// Only the time spent computing elements is counted; comparisons
/// against the reference are not. A sequence that has not yet been
/// advanced is always advanced at least once.
pub fn digits_correct_after(
    sequence: &mut ApproximationSequence,
    ctx: &Context,
    reference: &Decimal,
    target_digits: usize,
    bound: i64) -> Measurement
{
    let mut state = HarnessState::NotStarted;
    let mut elapsed = Duration::ZERO;
    let mut steps = 0;

    loop {
        if sequence.current_position() >= 0 {
            if has_converged(sequence.current_value(), reference, target_digits) {
                state = HarnessState::Converged;
                break;
            }
            if sequence.current_position() >= bound {
                state = HarnessState::Exhausted;
                break;
            }
        }

        let start = Instant::now();
        sequence.advance(ctx);
        elapsed += start.elapsed();
        steps += 1;
        if state == HarnessState::NotStarted {
            state = HarnessState::Advancing;
        }
    }

    let matching = matching_digits(sequence.current_value(), reference);
    match state {
        HarnessState::Exhausted => tracing::warn!(
            sequence = %sequence.kind(), target_digits, bound, matching,
            "safety bound reached before convergence"
        ),
        _ => tracing::debug!(
            sequence = %sequence.kind(), target_digits, steps, matching,
            elapsed = ?elapsed, "converged"
        ),
    }

    Measurement { state, elapsed, steps, matching }
}

/// Runtime study of a single sequence.
///
/// Successive calls to `approximation_up_to` resume the same sequence,
/// so asking for increasing numbers of digits measures the cumulative
/// cost of reaching each of them.
pub struct RuntimeAnalysis {
    sequence: ApproximationSequence,
    total: Duration,
    bound: i64,
}

impl RuntimeAnalysis {
    #[allow(unused)]
    pub fn new(sequence: ApproximationSequence) -> Self {
        Self::with_bound(sequence, DEFAULT_SAFETY_BOUND)
    }

    pub fn with_bound(sequence: ApproximationSequence, bound: i64) -> Self {
        Self {
            sequence,
            total: Duration::ZERO,
            bound,
        }
    }

    /// Advances the sequence until it agrees with `reference` to `digits`
    /// digits. The returned measurement carries the total time spent
    /// across all calls so far.
    pub fn approximation_up_to(&mut self, ctx: &Context, reference: &Decimal, digits: usize) -> Measurement {
        let mut m = digits_correct_after(&mut self.sequence, ctx, reference, digits, self.bound);
        self.total += m.elapsed;
        m.elapsed = self.total;
        m
    }

    #[allow(unused)]
    pub fn total_time(&self) -> Duration {
        self.total
    }

    pub fn sequence(&self) -> &ApproximationSequence {
        &self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference;
    use crate::sequence::SequenceKind;

    #[test]
    fn leibniz_five_digits() {
        let ctx = Context::new(50).unwrap();
        let mut seq = ApproximationSequence::new(SequenceKind::Leibniz, &ctx);
        let m = digits_correct_after(&mut seq, &ctx, reference::pi(), 5, DEFAULT_SAFETY_BOUND);
        println!("Leibniz: {:?}", m);
        assert_eq!(m.state, HarnessState::Converged);
        assert_eq!(m.steps, 10_794);
        assert!(m.matching >= 5);
    }

    #[test]
    fn chudnovsky_ten_digits() {
        let ctx = Context::new(50).unwrap();
        let mut seq = ApproximationSequence::new(SequenceKind::Chudnovsky, &ctx);
        let m = digits_correct_after(&mut seq, &ctx, reference::pi(), 10, DEFAULT_SAFETY_BOUND);
        println!("Chudnovsky: {:?}", m);
        assert_eq!(m.state, HarnessState::Converged);
        assert_eq!(m.steps, 1);
        assert_eq!(m.matching, 14);
    }

    #[test]
    fn short_exact_values_fall_short() {
        let pi = reference::pi();
        let d = |s: &str| s.parse::<Decimal>().unwrap();
        assert!(!has_converged(&d("3"), pi, 5));
        assert!(!has_converged(&d("3.14"), pi, 4));
        assert!(has_converged(&d("3.14"), pi, 3));
        assert!(has_converged(&d("3.14159265"), pi, 5));
        assert!(!has_converged(&d("3.2"), pi, 2));
        assert!(!has_converged(&Decimal::nan(), pi, 0));
    }

    #[test]
    fn monte_carlo_needs_enough_digits() {
        let ctx = Context::new(9).unwrap();
        for seed in 0..8 {
            let mut seq = ApproximationSequence::monte_carlo(MONTE_CARLO_SEED + seed);
            let m = digits_correct_after(&mut seq, &ctx, reference::pi(), 5, 5000);
            println!("seed {}: {} at position {}, {:?}", MONTE_CARLO_SEED + seed, seq.current_value(), seq.current_position(), m);
            match m.state {
                HarnessState::Converged => assert!(m.matching >= 5),
                HarnessState::Exhausted => {
                    assert!(m.matching < 5);
                    assert_eq!(seq.current_position(), 5000);
                },
                _ => panic!("measurement did not finish"),
            }
        }
    }

    #[test]
    fn chudnovsky_outpaces_leibniz() {
        let ctx = Context::new(50).unwrap();
        let target = 10;
        let bound = 20_000;

        let mut results = Vec::new();
        for kind in SequenceKind::ALL.iter() {
            let mut seq = ApproximationSequence::new(*kind, &ctx);
            let m = digits_correct_after(&mut seq, &ctx, reference::pi(), target, bound);
            println!("{}: {:?}", kind, m);
            if m.state == HarnessState::Converged {
                assert!(m.matching >= target);
            }
            results.push((*kind, m));
        }

        let find = |kind: SequenceKind| results.iter().find(|(k, _)| *k == kind).map(|(_, m)| m.clone()).unwrap();
        let chudnovsky = find(SequenceKind::Chudnovsky);
        let gauss_legendre = find(SequenceKind::GaussLegendre);
        let leibniz = find(SequenceKind::Leibniz);

        assert_eq!(chudnovsky.state, HarnessState::Converged);
        assert!(chudnovsky.steps <= 3);
        assert_eq!(gauss_legendre.state, HarnessState::Converged);
        assert!(gauss_legendre.steps <= 3);
        assert_eq!(leibniz.state, HarnessState::Exhausted);
        assert!(leibniz.steps >= 1000 * chudnovsky.steps);
    }

    #[test]
    fn bound_stops_slow_sequences() {
        let ctx = Context::new(50).unwrap();
        let mut seq = ApproximationSequence::new(SequenceKind::Leibniz, &ctx);
        let m = digits_correct_after(&mut seq, &ctx, reference::pi(), 10, 100);
        println!("Leibniz with bound 100: {:?}", m);
        assert_eq!(m.state, HarnessState::Exhausted);
        assert_eq!(seq.current_position(), 100);
        assert_eq!(m.steps, 101);
        assert!(m.matching < 10);
    }

    #[test]
    fn resumes_where_it_left_off() {
        let ctx = Context::new(104).unwrap();
        let seq = ApproximationSequence::new(SequenceKind::GaussLegendre, &ctx);
        let mut analysis = RuntimeAnalysis::new(seq);

        let mut last = Duration::ZERO;
        let mut position = -1;
        for digits in [1, 5, 10, 40, 80].iter() {
            let m = analysis.approximation_up_to(&ctx, reference::pi(), *digits);
            println!("{} digits: position {}, {:?}", digits, analysis.sequence().current_position(), m);
            assert_eq!(m.state, HarnessState::Converged);
            assert!(m.matching >= *digits);
            assert!(m.elapsed >= last);
            assert!(analysis.sequence().current_position() >= position);
            last = m.elapsed;
            position = analysis.sequence().current_position();
        }
        assert_eq!(analysis.total_time(), last);

        // already converged, so nothing more to do
        let m = analysis.approximation_up_to(&ctx, reference::pi(), 80);
        assert_eq!(m.steps, 0);
    }
}
