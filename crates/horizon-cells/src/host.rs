//! The widgets that host cells.

use horizon_cells_core::{Color, Font, Rect};

use crate::value::{CellValue, OBJECT, ValueType};

/// The kind of widget a cell lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    Table,
    Tree,
    List,
    Combo,
}

impl HostKind {
    /// Lower-case name used in errors and logs.
    pub fn name(self) -> &'static str {
        match self {
            HostKind::Table => "table",
            HostKind::Tree => "tree",
            HostKind::List => "list",
            HostKind::Combo => "combo",
        }
    }

    /// Prefix of this kind's look-and-feel keys (`"Table"` in `"Table.editorBorder"`).
    pub fn laf_prefix(self) -> &'static str {
        match self {
            HostKind::Table => "Table",
            HostKind::Tree => "Tree",
            HostKind::List => "List",
            HostKind::Combo => "ComboBox",
        }
    }
}

/// The host widget as seen by the dispatch engine.
///
/// Implemented by the toolkit integration for each table, tree, list or combo
/// box. All methods take `&self`; mutators such as
/// [`set_column_width`](Self::set_column_width) are expected to use interior
/// mutability, since the host is shared with every cell it renders.
///
/// Colors returning `None` mean "not configured on this widget", which makes
/// the dispatch engine fall back to look-and-feel defaults.
pub trait CellHost {
    /// The widget kind.
    fn kind(&self) -> HostKind;

    /// The widget background.
    fn background(&self) -> Option<Color>;

    /// The widget foreground.
    fn foreground(&self) -> Option<Color>;

    /// Background of selected cells.
    fn selection_background(&self) -> Option<Color> {
        None
    }

    /// Foreground of selected cells.
    fn selection_foreground(&self) -> Option<Color> {
        None
    }

    /// The widget font.
    fn font(&self) -> Option<Font> {
        None
    }

    /// Whether the widget accepts input.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Converts a value to the text the widget would show for it.
    fn value_to_text(&self, value: &CellValue, _row: usize) -> String {
        value.to_display_string()
    }

    /// The rectangle of a cell, in widget coordinates.
    fn cell_rect(&self, _row: usize, _column: usize) -> Rect {
        Rect::ZERO
    }

    /// Requests a new column width. Tables only.
    fn set_column_width(&self, _column: usize, _width: f32) {}

    /// Requests a new row height. Tables only.
    fn set_row_height(&self, _row: usize, _height: f32) {}

    /// The declared value type of a column. Tables only.
    fn column_type(&self, _column: usize) -> &'static ValueType {
        &OBJECT
    }
}
