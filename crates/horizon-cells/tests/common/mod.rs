//! Mock host widgets shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use horizon_cells::prelude::*;

/// A configurable host widget that records geometry requests.
pub struct MockHost {
    pub kind: HostKind,
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub selection_background: Option<Color>,
    pub selection_foreground: Option<Color>,
    pub enabled: bool,
    pub cell_size: Size,
    pub column_types: Vec<&'static ValueType>,
    pub widths: RefCell<Vec<(usize, f32)>>,
    pub heights: RefCell<Vec<(usize, f32)>>,
}

impl MockHost {
    pub fn new(kind: HostKind) -> Self {
        Self {
            kind,
            background: Some(Color::WHITE),
            foreground: Some(Color::BLACK),
            selection_background: Some(Color::BLUE),
            selection_foreground: Some(Color::WHITE),
            enabled: true,
            cell_size: Size::new(80.0, 20.0),
            column_types: Vec::new(),
            widths: RefCell::new(Vec::new()),
            heights: RefCell::new(Vec::new()),
        }
    }

    pub fn table() -> Self {
        Self::new(HostKind::Table)
    }

    pub fn with_column_types(mut self, types: Vec<&'static ValueType>) -> Self {
        self.column_types = types;
        self
    }

    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    pub fn without_selection_colors(mut self) -> Self {
        self.selection_background = None;
        self.selection_foreground = None;
        self
    }

    /// Share the host, keeping a typed handle for assertions.
    pub fn shared(self) -> (Rc<MockHost>, Rc<dyn CellHost>) {
        let host = Rc::new(self);
        let dynamic: Rc<dyn CellHost> = host.clone();
        (host, dynamic)
    }
}

impl CellHost for MockHost {
    fn kind(&self) -> HostKind {
        self.kind
    }

    fn background(&self) -> Option<Color> {
        self.background
    }

    fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    fn selection_background(&self) -> Option<Color> {
        self.selection_background
    }

    fn selection_foreground(&self) -> Option<Color> {
        self.selection_foreground
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn cell_rect(&self, row: usize, column: usize) -> Rect {
        Rect::new(
            column as f32 * self.cell_size.width,
            row as f32 * self.cell_size.height,
            self.cell_size.width,
            self.cell_size.height,
        )
    }

    fn set_column_width(&self, column: usize, width: f32) {
        self.widths.borrow_mut().push((column, width));
    }

    fn set_row_height(&self, row: usize, height: f32) {
        self.heights.borrow_mut().push((row, height));
    }

    fn column_type(&self, column: usize) -> &'static ValueType {
        self.column_types.get(column).copied().unwrap_or(&OBJECT)
    }
}

/// `B` derives from `Object`, `A` from `B`.
pub static B: ValueType = ValueType::derived("B", &OBJECT);
pub static A: ValueType = ValueType::derived("A", &B);

/// A value whose runtime type is [`A`].
#[derive(Debug)]
pub struct AValue(pub &'static str);

impl fmt::Display for AValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl CustomValue for AValue {
    fn value_type(&self) -> &'static ValueType {
        &A
    }
}

/// Append the declared type name to the cell's tooltips.
pub fn trace_rule(name: &'static str) -> impl Fn(Cell) -> Result<Cell> + 'static {
    move |cell: Cell| Ok(cell.with_tooltip(name))
}
