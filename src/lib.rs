//! Terminal layout engine for the Room toolkit.
//!
//! Nodes live in a [`LayoutTree`]; each draw resolves their sizes, shapes
//! and frames text, and composites every subtree into a block of styled rows
//! ready to be written to a terminal. Unchanged subtrees keep their rows
//! between draws.

pub mod cursor;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod reactive;
pub mod render;
pub mod style;
pub mod terminal;
pub mod text;
pub mod unit;
pub mod width;

pub use error::{LayoutError, Result};
pub use frame::{Border, BorderCharset, Spacing};
pub use geometry::{Rect, Size};
pub use layout::{
    Axis, LayoutConfig, LayoutTree, LeafProps, Node, NodeId, NodeKind, OverlayProps, Resize,
    StackProps,
};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use metrics::{MetricSnapshot, PassStats, RenderMetrics};
pub use reactive::{Derived, MaybeSignal, Signal, Source};
pub use render::{AnsiRenderer, RenderMode, RendererSettings, fit_into_console, render, render_relative};
pub use style::{StringStyler, Style};
pub use terminal::{CrosstermTerminal, FixedTerminal, Terminal};
pub use text::{HorizontalAlign, Overflow, TextStyle, VerticalAlign, Wrap};
pub use unit::{Length, Unit, calc};
pub use width::{crop_end, crop_start, display_width, insert, slice_by_width, strip_styles};
