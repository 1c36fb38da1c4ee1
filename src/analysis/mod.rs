//! Measuring how quickly the approximation sequences approach π

mod mismatch;
mod runtime;
mod convergence;
mod memory;

pub use mismatch::*;
pub use runtime::*;
pub use convergence::*;
pub use memory::*;
