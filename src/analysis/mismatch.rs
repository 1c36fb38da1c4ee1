//! Digit-wise comparison of decimal values

use crate::decimal::Decimal;

/// The first place at which two digit sequences disagree
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    pub left: u8,
    pub right: u8,
}

/// Compares the coefficient digits of `a` and `b` in lock-step,
/// starting from the most significant digit. The position of the
/// decimal point is not taken into account.
///
/// Returns `None` if one digit sequence is a prefix of the other.
pub fn first_mismatch(a: &Decimal, b: &Decimal) -> Option<Mismatch> {
    a.digits().into_iter()
        .zip(b.digits())
        .enumerate()
        .find(|(_, (left, right))| left != right)
        .map(|(index, (left, right))| Mismatch { index, left, right })
}

/// Number of leading digits that `candidate` shares with `reference`.
/// A NaN candidate matches nothing.
pub fn matching_digits(candidate: &Decimal, reference: &Decimal) -> usize {
    if candidate.is_nan() {
        return 0;
    }

    match first_mismatch(candidate, reference) {
        Some(m) => m.index,
        None => candidate.digits().len().min(reference.digits().len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn finds_first_difference() {
        let m = first_mismatch(&d("3.1416"), &d("3.14159"));
        println!("{:?}", m);
        assert_eq!(m, Some(Mismatch { index: 4, left: 6, right: 5 }));
        assert_eq!(first_mismatch(&d("4"), &d("3.14")), Some(Mismatch { index: 0, left: 4, right: 3 }));
    }

    #[test]
    fn prefix_is_not_a_mismatch() {
        assert_eq!(first_mismatch(&d("3.14"), &d("3.14159")), None);
        assert_eq!(first_mismatch(&d("3.14159"), &d("3.14")), None);
        assert_eq!(first_mismatch(&d("3.14"), &d("3.14")), None);
        assert_eq!(matching_digits(&d("3.14"), &d("3.14159")), 3);
    }

    #[test]
    fn decimal_point_is_ignored() {
        // 31.4 and 3.14 have the same digit tuple
        assert_eq!(first_mismatch(&d("31.4"), &d("3.14")), None);
        assert_eq!(matching_digits(&d("0.0314"), &d("3.14159")), 3);
    }

    #[test]
    fn nan_matches_nothing() {
        assert_eq!(first_mismatch(&Decimal::nan(), &d("3.14")), None);
        assert_eq!(matching_digits(&Decimal::nan(), &d("3.14")), 0);
        assert_eq!(matching_digits(&d("3.2"), &d("3.14")), 1);
    }
}
