use thiserror::Error;

use crate::layout::NodeId;
use crate::logging::LoggingError;

/// Unified result type for the layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by the layout engine.
///
/// Everything except `Io`/`Logging` is a mistake in the layout description;
/// clipping and overflow never show up here.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid formula `{formula}`: {reason}")]
    InvalidFormula { formula: String, reason: String },
    #[error("invalid unit `{0}`")]
    InvalidUnit(String),
    #[error("gap cannot be negative, resolved to {0}")]
    NegativeGap(i64),
    #[error("node {node} is auto-sized but has no predictably-sized children")]
    NoPredictableChildren { node: NodeId },
    #[error("element is too narrow to be created, its width is {width}, too small by {missing}")]
    TooNarrow { width: i64, missing: i64 },
    #[error("element is too short to be created, its height is {height}, too small by {missing}")]
    TooShort { height: i64, missing: i64 },
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    #[error("node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("overlay takes exactly a background and a foreground child")]
    OverlayChildren,
    #[error("styled leaf {0} cannot have children")]
    LeafChildren(NodeId),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
