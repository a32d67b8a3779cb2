//! Layout tree: node storage, size resolution, change tracking and the
//! layout pass that turns a subtree into lines.
//!
//! Everything hangs off [`LayoutTree`]; the submodules each add one phase to
//! it as a separate `impl` block.

mod arrange;
mod compute;
mod config;
mod core;
mod leaf;
mod node;
mod overlay;
mod stack;
mod tracking;

pub use config::LayoutConfig;
pub use core::LayoutTree;
pub use node::{Axis, LeafProps, Node, NodeId, NodeKind, OverlayProps, Resize, StackProps};
