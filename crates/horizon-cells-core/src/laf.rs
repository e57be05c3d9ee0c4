//! Look-and-feel defaults.
//!
//! A [`LookAndFeel`] is a flat table of string keys to colors, borders and
//! fonts (`"Table.selectionBackground"`, `"List.cellNoFocusBorder"`, ...).
//! Cell renderers consult it whenever a host widget does not specify a value
//! itself. Lookups are always by copy, so values taken out of the table are
//! plain values that later changes to the table cannot affect.
//!
//! One look-and-feel is installed process-wide; adapters snapshot it when
//! they are constructed:
//!
//! ```
//! use horizon_cells_core::LookAndFeel;
//!
//! LookAndFeel::install(LookAndFeel::dark());
//! assert_eq!(LookAndFeel::current().name(), "dark");
//! LookAndFeel::install(LookAndFeel::light());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::border::Border;
use crate::font::Font;
use crate::logging::targets;
use crate::types::Color;

/// Well-known look-and-feel keys used by the cell engine.
pub mod keys {
    pub const LIST_SELECTION_BACKGROUND: &str = "List.selectionBackground";
    pub const LIST_SELECTION_FOREGROUND: &str = "List.selectionForeground";
    pub const LIST_DROP_CELL_BACKGROUND: &str = "List.dropCellBackground";
    pub const LIST_DROP_CELL_FOREGROUND: &str = "List.dropCellForeground";
    pub const LIST_FOCUS_SELECTED_CELL_BORDER: &str = "List.focusSelectedCellHighlightBorder";
    pub const LIST_FOCUS_CELL_BORDER: &str = "List.focusCellHighlightBorder";
    pub const LIST_NO_FOCUS_BORDER: &str = "List.cellNoFocusBorder";
    pub const LIST_EDITOR_BORDER: &str = "List.editorBorder";

    pub const TABLE_SELECTION_BACKGROUND: &str = "Table.selectionBackground";
    pub const TABLE_SELECTION_FOREGROUND: &str = "Table.selectionForeground";
    pub const TABLE_FOCUS_SELECTED_CELL_BORDER: &str = "Table.focusSelectedCellHighlightBorder";
    pub const TABLE_FOCUS_CELL_BORDER: &str = "Table.focusCellHighlightBorder";
    pub const TABLE_NO_FOCUS_BORDER: &str = "Table.cellNoFocusBorder";
    pub const TABLE_EDITOR_BORDER: &str = "Table.editorBorder";

    pub const TREE_SELECTION_BACKGROUND: &str = "Tree.selectionBackground";
    pub const TREE_SELECTION_FOREGROUND: &str = "Tree.selectionForeground";
    pub const TREE_EDITOR_BORDER: &str = "Tree.editorBorder";

    pub const COMBO_SELECTION_BACKGROUND: &str = "ComboBox.selectionBackground";
    pub const COMBO_SELECTION_FOREGROUND: &str = "ComboBox.selectionForeground";
    pub const COMBO_BACKGROUND: &str = "ComboBox.background";
    pub const COMBO_FOREGROUND: &str = "ComboBox.foreground";
    pub const COMBO_EDITOR_BORDER: &str = "ComboBox.editorBorder";

    pub const DEFAULT_FONT: &str = "defaultFont";
}

/// A single look-and-feel entry.
#[derive(Debug, Clone, PartialEq)]
pub enum UiDefault {
    Color(Color),
    Border(Border),
    Font(Font),
}

/// Base colors a preset is derived from.
#[derive(Debug, Clone)]
struct Palette {
    primary: Color,
    on_primary: Color,
    background: Color,
    surface: Color,
    text_primary: Color,
    border: Color,
}

impl Palette {
    fn light() -> Self {
        Self {
            primary: Color::from_rgb8(0x00, 0x7A, 0xFF),
            on_primary: Color::WHITE,
            background: Color::WHITE,
            surface: Color::from_rgb8(0xF8, 0xF9, 0xFA),
            text_primary: Color::from_rgb8(0x21, 0x25, 0x29),
            border: Color::from_rgb8(0xDE, 0xE2, 0xE6),
        }
    }

    fn dark() -> Self {
        Self {
            primary: Color::from_rgb8(0x0A, 0x84, 0xFF),
            on_primary: Color::WHITE,
            background: Color::from_rgb8(0x1C, 0x1C, 0x1E),
            surface: Color::from_rgb8(0x2C, 0x2C, 0x2E),
            text_primary: Color::WHITE,
            border: Color::from_rgb8(0x38, 0x38, 0x3A),
        }
    }
}

/// Keyed look-and-feel defaults.
#[derive(Debug, Clone, Default)]
pub struct LookAndFeel {
    name: String,
    defaults: HashMap<String, UiDefault>,
}

impl LookAndFeel {
    /// Create an empty look-and-feel. Every lookup on it yields `None`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defaults: HashMap::new(),
        }
    }

    /// The light preset.
    pub fn light() -> Self {
        Self::from_palette("light", &Palette::light())
    }

    /// The dark preset.
    pub fn dark() -> Self {
        Self::from_palette("dark", &Palette::dark())
    }

    fn from_palette(name: &str, palette: &Palette) -> Self {
        use keys::*;

        let focus = Border::dashed(palette.primary, 1.0);
        let focus_selected = Border::dashed(palette.on_primary, 1.0);
        let no_focus = Border::empty(1.0);
        let editor = Border::line(palette.border, 1.0);

        Self::new(name)
            .with_color(LIST_SELECTION_BACKGROUND, palette.primary)
            .with_color(LIST_SELECTION_FOREGROUND, palette.on_primary)
            .with_color(LIST_DROP_CELL_BACKGROUND, palette.surface)
            .with_color(LIST_DROP_CELL_FOREGROUND, palette.text_primary)
            .with_border(LIST_FOCUS_SELECTED_CELL_BORDER, focus_selected)
            .with_border(LIST_FOCUS_CELL_BORDER, focus)
            .with_border(LIST_NO_FOCUS_BORDER, no_focus)
            .with_border(LIST_EDITOR_BORDER, editor)
            .with_color(TABLE_SELECTION_BACKGROUND, palette.primary)
            .with_color(TABLE_SELECTION_FOREGROUND, palette.on_primary)
            .with_border(TABLE_FOCUS_SELECTED_CELL_BORDER, focus_selected)
            .with_border(TABLE_FOCUS_CELL_BORDER, focus)
            .with_border(TABLE_NO_FOCUS_BORDER, no_focus)
            .with_border(TABLE_EDITOR_BORDER, editor)
            .with_color(TREE_SELECTION_BACKGROUND, palette.primary)
            .with_color(TREE_SELECTION_FOREGROUND, palette.on_primary)
            .with_border(TREE_EDITOR_BORDER, editor)
            .with_color(COMBO_SELECTION_BACKGROUND, palette.primary)
            .with_color(COMBO_SELECTION_FOREGROUND, palette.on_primary)
            .with_color(COMBO_BACKGROUND, palette.background)
            .with_color(COMBO_FOREGROUND, palette.text_primary)
            .with_border(COMBO_EDITOR_BORDER, editor)
            .with_font(DEFAULT_FONT, Font::default())
    }

    /// The preset or custom name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets an entry, replacing any previous value for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: UiDefault) {
        self.defaults.insert(key.into(), value);
    }

    /// Removes an entry.
    pub fn remove(&mut self, key: &str) -> Option<UiDefault> {
        self.defaults.remove(key)
    }

    /// Sets a color entry using builder pattern.
    pub fn with_color(mut self, key: impl Into<String>, color: Color) -> Self {
        self.set(key, UiDefault::Color(color));
        self
    }

    /// Sets a border entry using builder pattern.
    pub fn with_border(mut self, key: impl Into<String>, border: Border) -> Self {
        self.set(key, UiDefault::Border(border));
        self
    }

    /// Sets a font entry using builder pattern.
    pub fn with_font(mut self, key: impl Into<String>, font: Font) -> Self {
        self.set(key, UiDefault::Font(font));
        self
    }

    /// Gets a raw entry.
    pub fn get(&self, key: &str) -> Option<&UiDefault> {
        self.defaults.get(key)
    }

    /// Gets a color entry; `None` if absent or not a color.
    pub fn color(&self, key: &str) -> Option<Color> {
        match self.defaults.get(key) {
            Some(UiDefault::Color(color)) => Some(*color),
            _ => None,
        }
    }

    /// Gets a border entry; `None` if absent or not a border.
    pub fn border(&self, key: &str) -> Option<Border> {
        match self.defaults.get(key) {
            Some(UiDefault::Border(border)) => Some(*border),
            _ => None,
        }
    }

    /// Gets a font entry; `None` if absent or not a font.
    pub fn font(&self, key: &str) -> Option<Font> {
        match self.defaults.get(key) {
            Some(UiDefault::Font(font)) => Some(font.clone()),
            _ => None,
        }
    }

    /// The first color found among `keys`, tried in order.
    pub fn first_color<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Option<Color> {
        keys.into_iter().find_map(|key| self.color(key))
    }

    /// The first border found among `keys`, tried in order.
    pub fn first_border<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Option<Border> {
        keys.into_iter().find_map(|key| self.border(key))
    }

    /// The currently installed look-and-feel.
    ///
    /// Defaults to [`LookAndFeel::light`] until something else is installed.
    pub fn current() -> Arc<LookAndFeel> {
        installed().read().clone()
    }

    /// Installs a look-and-feel process-wide.
    ///
    /// Adapters that already exist keep the look-and-feel they were built with.
    pub fn install(laf: LookAndFeel) {
        tracing::debug!(target: targets::LAF, name = %laf.name, "installing look-and-feel");
        *installed().write() = Arc::new(laf);
    }
}

fn installed() -> &'static RwLock<Arc<LookAndFeel>> {
    static INSTALLED: OnceLock<RwLock<Arc<LookAndFeel>>> = OnceLock::new();
    INSTALLED.get_or_init(|| RwLock::new(Arc::new(LookAndFeel::light())))
}
