//! Exact integer functions used by the series expansions

mod factorial;

pub use factorial::*;
