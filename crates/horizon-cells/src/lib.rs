//! Declarative cell rendering and editing for tables, trees, lists and combo boxes.
//!
//! This crate decides which component a host widget shows for each cell:
//!
//! - **Rules**: `(value type, predicate, configurator)` triples registered
//!   through a [`CellBuilder`]
//! - **Resolution**: every rule whose declared type is the value's runtime
//!   type or one of its ancestors applies, least specific first
//! - **Default appearance**: a text label with colors and borders derived
//!   from the host widget and the [`LookAndFeel`]
//! - **Adapters**: the callbacks a host calls per cell, with component
//!   caches, a generic cell editor and table geometry fitting
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use horizon_cells::prelude::*;
//!
//! struct Speeds;
//!
//! impl CellHost for Speeds {
//!     fn kind(&self) -> HostKind {
//!         HostKind::Table
//!     }
//!     fn background(&self) -> Option<Color> {
//!         Some(Color::WHITE)
//!     }
//!     fn foreground(&self) -> Option<Color> {
//!         Some(Color::BLACK)
//!     }
//! }
//!
//! let mut adapter = CellBuilder::for_table(&OBJECT)
//!     .when(&INTEGER)
//!     .as_text(|cell| format!("{} km/h", cell.value_as_string()))?
//!     .table_adapter()?;
//!
//! let table: Rc<dyn CellHost> = Rc::new(Speeds);
//! let component = adapter.table_cell_renderer(&table, CellValue::from(42), false, false, 0, 0);
//! assert_eq!(component.text().as_deref(), Some("42 km/h"));
//! assert_eq!(component.borrow().background(), Some(Color::WHITE));
//! # Ok::<(), horizon_cells::CellError>(())
//! ```
//!
//! # Threading
//!
//! Cells, components and adapters live on the UI thread. They are built on
//! `Rc` and `RefCell` and are neither `Send` nor `Sync`.

pub mod adapter;
pub mod appearance;
mod builder;
pub mod cell;
pub mod component;
mod dispatch;
pub mod editor;
pub mod host;
pub mod rules;
pub mod toolkit;
pub mod value;

pub use horizon_cells_core::{
    Border, BorderStyle, CellError, Color, DispatchSpan, Font, FontFamily, FontWeight,
    LookAndFeel, Point, Rect, Result, Size, UiDefault, laf, logging,
};

pub use adapter::{ComboCellEditor, GridCellAdapter, ListCellAdapter};
pub use appearance::{ColorKeys, DefaultAppearance, FallbackKeys};
pub use builder::{CellBuilder, RenderAs};
pub use cell::{Cell, CellSnapshot, CellState};
pub use component::{Component, ComponentHandle, ComponentOrigin, PaintSurface, Widget, WidgetKind};
pub use dispatch::apply;
pub use editor::{CellEditor, CellEditorListener, EditTrigger};
pub use host::{CellHost, HostKind};
pub use rules::{Rule, RuleStore};
pub use value::{CellValue, CustomValue, ValueType};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::adapter::{ComboCellEditor, GridCellAdapter, ListCellAdapter};
    pub use crate::appearance::{ColorKeys, FallbackKeys};
    pub use crate::builder::{CellBuilder, RenderAs};
    pub use crate::cell::{Cell, CellSnapshot, CellState};
    pub use crate::component::{
        ActionListener, Alignment, ComponentHandle, ComponentOrigin, PaintSurface, WidgetKind,
    };
    pub use crate::editor::{CellEditorListener, EditTrigger};
    pub use crate::host::{CellHost, HostKind};
    pub use crate::value::{
        BOOLEAN, CellValue, CustomValue, DOUBLE, INTEGER, NUMBER, OBJECT, STRING, ValueType,
    };
    pub use horizon_cells_core::{Border, CellError, Color, LookAndFeel, Rect, Result, Size};
}
