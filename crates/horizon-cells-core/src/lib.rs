//! Core value types for Horizon Cells.
//!
//! This crate provides the small, toolkit-independent building blocks that the
//! cell dispatch engine in `horizon-cells` consumes:
//!
//! - **Errors**: [`CellError`] and the crate-wide [`Result`] alias
//! - **Logging**: tracing targets and the [`DispatchSpan`] guard
//! - **Value types**: [`Color`], [`Point`], [`Size`], [`Rect`], [`Border`], [`Font`]
//! - **Look-and-feel**: keyed defaults ([`LookAndFeel`]) with light and dark presets
//!
//! # Look-and-feel Example
//!
//! ```
//! use horizon_cells_core::{Color, LookAndFeel};
//!
//! let laf = LookAndFeel::light()
//!     .with_color("Table.selectionBackground", Color::from_rgb8(200, 0, 0));
//!
//! let bg = laf.first_color(["Missing.key", "Table.selectionBackground"]);
//! assert_eq!(bg, Some(Color::from_rgb8(200, 0, 0)));
//! ```
//!
//! # Striping Example
//!
//! ```
//! use horizon_cells_core::Color;
//!
//! let light = Color::WHITE;
//! assert!(light.brightness() >= 0.5);
//! assert!(light.darker().channel_sum() < light.channel_sum());
//! ```

mod border;
mod error;
mod font;
pub mod laf;
pub mod logging;
mod types;

pub use border::{Border, BorderStyle};
pub use error::{CellError, Result};
pub use font::{Font, FontFamily, FontWeight};
pub use laf::{LookAndFeel, UiDefault};
pub use logging::DispatchSpan;
pub use types::{Color, Point, Rect, Size};
