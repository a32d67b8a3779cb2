//! Turning a drawn subtree into terminal output.

mod core;

pub use core::{AnsiRenderer, RenderMode, RendererSettings, fit_into_console, render, render_relative};
