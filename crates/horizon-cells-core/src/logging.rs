//! Logging facilities for Horizon Cells.
//!
//! Horizon Cells uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_cells::dispatch=debug")
//!         .init();
//! }
//! ```
//!
//! Failures inside caller-supplied configurators and custom painters are
//! reported at `warn` level on the targets below and never propagate into the
//! host toolkit's paint or edit cycle.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Rule resolution and application.
    pub const DISPATCH: &str = "horizon_cells::dispatch";
    /// Cell editor lifecycle and value conversion.
    pub const EDITOR: &str = "horizon_cells::editor";
    /// Painting of custom cell components.
    pub const PAINT: &str = "horizon_cells::paint";
    /// Rule registration and adapter construction.
    pub const BUILDER: &str = "horizon_cells::builder";
    /// Look-and-feel installation.
    pub const LAF: &str = "horizon_cells::laf";
}

/// A guard that keeps a dispatch span entered until dropped.
///
/// Adapters create one of these around every render/edit callback so that
/// warnings emitted by failing configurators carry the callback and cell
/// coordinates.
#[derive(Debug)]
pub struct DispatchSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl DispatchSpan {
    /// Enter a new dispatch span for the given callback and cell position.
    pub fn new(callback: &'static str, row: usize, column: usize) -> Self {
        let span = tracing::debug_span!(
            target: targets::DISPATCH,
            "dispatch",
            callback,
            row,
            column
        );
        Self {
            span: span.entered(),
        }
    }
}
