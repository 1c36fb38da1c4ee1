//! Partial sums of the harmonic series in finite precision,
//! comparing how different summation orders accumulate rounding error.

use std::fmt;
use std::str::FromStr;

use num_traits::{AsPrimitive, Float};

use crate::error::SetupError;
use crate::spacing::logspace_int;

/// Number of terms summed sequentially at the leaves of `pairwise_sum`
const PAIRWISE_BLOCK: usize = 128;

/// Order in which the terms 1/k are accumulated
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Summation {
    Forward,
    Kahan,
    Pairwise,
}

impl Summation {
    pub const ALL: [Summation; 3] = [Summation::Forward, Summation::Kahan, Summation::Pairwise];

    pub fn name(&self) -> &'static str {
        match self {
            Summation::Forward => "forward",
            Summation::Kahan => "kahan",
            Summation::Pairwise => "pairwise",
        }
    }

    /// The `n`-th harmonic number, H_n = 1 + 1/2 + ... + 1/n.
    pub fn sum<T>(&self, n: u64) -> T
    where T: Float + 'static, u64: AsPrimitive<T> {
        match self {
            Summation::Forward => forward_sum(n),
            Summation::Kahan => kahan_sum(n),
            Summation::Pairwise => pairwise_sum(n),
        }
    }
}

impl fmt::Display for Summation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Summation {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forward" => Ok(Summation::Forward),
            "kahan" => Ok(Summation::Kahan),
            "pairwise" | "vectorized" => Ok(Summation::Pairwise),
            _ => Err(SetupError::unknown_summation(s)),
        }
    }
}

fn term<T>(k: u64) -> T where T: Float + 'static, u64: AsPrimitive<T> {
    T::one() / k.as_()
}

/// Adds the terms from left to right.
pub fn forward_sum<T>(n: u64) -> T where T: Float + 'static, u64: AsPrimitive<T> {
    (1..=n).fold(T::zero(), |sum, k| sum + term(k))
}

/// Adds the terms from left to right, carrying the low-order bits lost
/// in each addition over to the next term.
pub fn kahan_sum<T>(n: u64) -> T where T: Float + 'static, u64: AsPrimitive<T> {
    let mut sum = T::zero();
    let mut c = T::zero();
    for k in 1..=n {
        let y = term::<T>(k) - c;
        let t = sum + y;
        c = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Splits the terms in half recursively, adding short runs
/// in eight interleaved accumulators.
pub fn pairwise_sum<T>(n: u64) -> T where T: Float + 'static, u64: AsPrimitive<T> {
    let terms: Vec<T> = (1..=n).map(term).collect();
    pairwise(&terms)
}

fn pairwise<T: Float>(v: &[T]) -> T {
    let n = v.len();
    if n < 8 {
        v.iter().fold(T::zero(), |sum, &x| sum + x)
    } else if n <= PAIRWISE_BLOCK {
        let mut r = [T::zero(); 8];
        r.copy_from_slice(&v[..8]);
        let mut i = 8;
        while i + 8 <= n {
            for j in 0..8 {
                r[j] = r[j] + v[i + j];
            }
            i += 8;
        }
        let mut sum = ((r[0] + r[1]) + (r[2] + r[3])) + ((r[4] + r[5]) + (r[6] + r[7]));
        for &x in &v[i..] {
            sum = sum + x;
        }
        sum
    } else {
        // split on a multiple of the block width
        let half = (n / 2) - (n / 2) % 8;
        pairwise(&v[..half]) + pairwise(&v[half..])
    }
}

/// Harmonic numbers H_n at `num` logarithmically spaced `n = 10^x`,
/// x evenly spaced over `[start, stop]`.
pub fn harmonic_sum<T>(start: f64, stop: f64, num: usize, algorithm: Summation) -> Result<Vec<(u64, T)>, SetupError>
where T: Float + 'static, u64: AsPrimitive<T> {
    let v = logspace_int(start, stop, num, 10.0)?
        .into_iter()
        .map(|n| (n, algorithm.sum(n)))
        .collect();
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sums_agree() {
        let exact = 1.0 + 0.5 + 1.0 / 3.0 + 0.25;
        for alg in Summation::ALL.iter() {
            let s: f64 = alg.sum(4);
            println!("{}: H_4 = {}", alg, s);
            assert!((s - exact).abs() < 1.0e-15);
            assert_eq!(alg.sum::<f64>(0), 0.0);
        }
    }

    #[test]
    fn kahan_beats_forward_in_single_precision() {
        let n = 1_000_000;
        let reference: f64 = kahan_sum(n);
        let forward = forward_sum::<f32>(n) as f64;
        let kahan = kahan_sum::<f32>(n) as f64;
        let pairwise = pairwise_sum::<f32>(n) as f64;
        println!("H_n: f64 = {:.7}, forward = {:.7}, kahan = {:.7}, pairwise = {:.7}", reference, forward, kahan, pairwise);

        let forward_error = (forward - reference).abs();
        let kahan_error = (kahan - reference).abs();
        let pairwise_error = (pairwise - reference).abs();
        assert!(kahan_error < forward_error);
        assert!(pairwise_error < forward_error);
        assert!(kahan_error < 1.0e-5);
    }

    #[test]
    fn pairwise_uneven_lengths() {
        for n in [7u64, 8, 9, 129, 1000, 4097].iter() {
            let a: f64 = pairwise_sum(*n);
            let b: f64 = kahan_sum(*n);
            assert!((a - b).abs() < 1.0e-12, "n = {}: {} vs {}", n, a, b);
        }
    }

    #[test]
    fn sampled_sums() {
        let sums = harmonic_sum::<f64>(0.0, 3.0, 4, Summation::Forward).unwrap();
        let ns: Vec<u64> = sums.iter().map(|s| s.0).collect();
        assert_eq!(ns, vec![1, 10, 100, 1000]);
        assert_eq!(sums[0].1, 1.0);
        assert!((sums[3].1 - 7.485470860550343).abs() < 1.0e-12);
        assert!(harmonic_sum::<f32>(0.0, 3.0, 1, Summation::Kahan).is_err());
    }

    #[test]
    fn parse_names() {
        assert_eq!("Kahan".parse::<Summation>(), Ok(Summation::Kahan));
        assert_eq!(" forward".parse::<Summation>(), Ok(Summation::Forward));
        assert_eq!("Vectorized".parse::<Summation>(), Ok(Summation::Pairwise));
        assert_eq!("naive".parse::<Summation>(), Err(SetupError::unknown_summation("naive")));
    }
}
