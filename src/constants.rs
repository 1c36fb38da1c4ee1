//! Numerical constants

/// π to 1000 decimal places, wrapped over several lines
pub const PI_DIGITS: &str = include_str!("../data/PI");
/// Seed of the Monte Carlo sampler
pub const MONTE_CARLO_SEED: u64 = 420;
/// Linear coefficients of the Chudnovsky numerator, 13591409 + 545140134 k
pub const CHUDNOVSKY_A: u64 = 13591409;
pub const CHUDNOVSKY_B: u64 = 545140134;
/// The Chudnovsky denominator grows as (-640320)^(3k)
pub const CHUDNOVSKY_C: i64 = -640320;
/// Prefactor C = 426880 sqrt(10005)
pub const CHUDNOVSKY_SCALE: u64 = 426880;
pub const CHUDNOVSKY_RADICAND: u64 = 10005;
/// Correct digits gained per Chudnovsky term
pub const CHUDNOVSKY_DIGITS_PER_TERM: i64 = 14;
/// Largest position the runtime harness advances to
pub const DEFAULT_SAFETY_BOUND: i64 = 1_000_000;
/// Version stamped into saved parameter records
pub const RECORD_VERSION: f64 = 1.1;
