//! Deferred size specifications.
//!
//! Callers describe sizes, gaps and offsets as units; the layout tree resolves
//! them against the parent's geometry during compute.

mod core;
mod formula;

pub use core::{DynamicFn, Length, Unit, round_half_up};
pub use formula::calc;
