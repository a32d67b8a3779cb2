//! Minimal reactive values and the polled bindings that connect them to
//! layout nodes.

mod binding;
mod signal;

pub(crate) use binding::Binding;
pub use signal::{Derived, MaybeSignal, Signal, Source};
