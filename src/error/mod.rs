//! Error taxonomy for the layout engine.

mod types;

pub use types::{LayoutError, Result};
