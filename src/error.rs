//! Invalid experiment configuration

use std::fmt;
use std::error::Error;

/// Raised when the parameters of an experiment are rejected
/// before any work is done.
#[derive(Clone, PartialEq)]
pub enum SetupError {
    TooFewSamples { required: usize, given: usize },
    NonPositivePrecision,
    UnknownSequence(String),
    UnknownSummation(String),
    OutOfRange(String, i64, i64),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetupError::TooFewSamples { required, given } => write!(f, "at least {} samples are required, got {}", required, given),
            SetupError::NonPositivePrecision => write!(f, "precision must be at least one significant digit"),
            SetupError::UnknownSequence(s) => write!(f, "'{}' is not one of Leibniz, MonteCarlo, GaussLegendre, Chudnovsky", s),
            SetupError::UnknownSummation(s) => write!(f, "'{}' is not one of forward, kahan, pairwise", s),
            SetupError::OutOfRange(name, min, max) => write!(f, "'{}' must lie between {} and {}", name, min, max),
        }
    }
}

impl fmt::Debug for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Error for SetupError {}

impl SetupError {
    pub fn too_few_samples(required: usize, given: usize) -> Self {
        Self::TooFewSamples { required, given }
    }

    pub fn unknown_sequence(name: &str) -> Self {
        Self::UnknownSequence(name.to_owned())
    }

    pub fn unknown_summation(name: &str) -> Self {
        Self::UnknownSummation(name.to_owned())
    }

    pub fn out_of_range(name: &str, min: i64, max: i64) -> Self {
        Self::OutOfRange(name.to_owned(), min, max)
    }
}
