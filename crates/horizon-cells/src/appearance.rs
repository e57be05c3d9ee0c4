//! The built-in default appearance: a text label with computed colors and borders.
//!
//! [`DefaultAppearance`] is registered as the lowest-precedence rule of every
//! builder and is also what [`RenderAs::as_text`](crate::RenderAs::as_text)
//! uses. It only ever touches its own internal label; a cell that already
//! carries a caller component passes through untouched.
//!
//! Colors are looked up in this order:
//!
//! 1. Combo hosts with a popup list: the list's selection colors (selected
//!    cells) or its plain colors.
//! 2. Other hosts: the host's selection colors, then the host kind's
//!    selection keys from [`FallbackKeys`].
//! 3. The host's own background/foreground.
//! 4. The shared fallback keys.

use std::collections::HashMap;
use std::sync::Arc;

use horizon_cells_core::laf::keys;
use horizon_cells_core::{Border, Color, LookAndFeel};

use crate::cell::Cell;
use crate::component::{ComponentHandle, ComponentOrigin, WidgetKind};
use crate::host::HostKind;

/// An ordered list of look-and-feel keys for a background and a foreground.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorKeys {
    pub background: Vec<String>,
    pub foreground: Vec<String>,
}

impl ColorKeys {
    /// Create key lists from string slices.
    pub fn new<'a>(
        background: impl IntoIterator<Item = &'a str>,
        foreground: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            background: background.into_iter().map(str::to_owned).collect(),
            foreground: foreground.into_iter().map(str::to_owned).collect(),
        }
    }
}

/// Look-and-feel key chains consulted by the default appearance and the
/// default cell editor.
///
/// Keep these as data so that a different native look-and-feel can supply
/// its own key names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackKeys {
    selection: HashMap<HostKind, ColorKeys>,
    shared: ColorKeys,
    focus_selected_border: Vec<String>,
    focus_border: Vec<String>,
    no_focus_border: Vec<String>,
    editor_border: HashMap<HostKind, Vec<String>>,
}

impl Default for FallbackKeys {
    fn default() -> Self {
        Self::standard()
    }
}

impl FallbackKeys {
    /// Key chains without any keys. Every lookup falls through to host colors.
    pub fn empty() -> Self {
        Self {
            selection: HashMap::new(),
            shared: ColorKeys::default(),
            focus_selected_border: Vec::new(),
            focus_border: Vec::new(),
            no_focus_border: Vec::new(),
            editor_border: HashMap::new(),
        }
    }

    /// The standard key names.
    pub fn standard() -> Self {
        let mut selection = HashMap::new();
        selection.insert(
            HostKind::List,
            ColorKeys::new(
                [keys::LIST_SELECTION_BACKGROUND],
                [keys::LIST_SELECTION_FOREGROUND],
            ),
        );
        selection.insert(
            HostKind::Table,
            ColorKeys::new(
                [keys::TABLE_SELECTION_BACKGROUND],
                [keys::TABLE_SELECTION_FOREGROUND],
            ),
        );
        selection.insert(
            HostKind::Tree,
            ColorKeys::new(
                [keys::TREE_SELECTION_BACKGROUND],
                [keys::TREE_SELECTION_FOREGROUND],
            ),
        );

        let mut editor_border = HashMap::new();
        editor_border.insert(HostKind::Table, vec![keys::TABLE_EDITOR_BORDER.to_owned()]);
        editor_border.insert(HostKind::Tree, vec![keys::TREE_EDITOR_BORDER.to_owned()]);
        editor_border.insert(HostKind::List, vec![keys::LIST_EDITOR_BORDER.to_owned()]);
        editor_border.insert(HostKind::Combo, vec![keys::COMBO_EDITOR_BORDER.to_owned()]);

        Self {
            selection,
            shared: ColorKeys::new(
                [
                    keys::COMBO_SELECTION_BACKGROUND,
                    keys::LIST_DROP_CELL_BACKGROUND,
                    keys::COMBO_BACKGROUND,
                ],
                [
                    keys::COMBO_SELECTION_FOREGROUND,
                    keys::LIST_DROP_CELL_FOREGROUND,
                    keys::COMBO_FOREGROUND,
                ],
            ),
            focus_selected_border: vec![keys::LIST_FOCUS_SELECTED_CELL_BORDER.to_owned()],
            focus_border: vec![keys::LIST_FOCUS_CELL_BORDER.to_owned()],
            no_focus_border: vec![keys::LIST_NO_FOCUS_BORDER.to_owned()],
            editor_border,
        }
    }

    /// Replace the selection keys of a host kind.
    pub fn with_selection_keys(mut self, kind: HostKind, keys: ColorKeys) -> Self {
        self.selection.insert(kind, keys);
        self
    }

    /// Replace the keys tried after the host's own colors.
    pub fn with_shared_keys(mut self, keys: ColorKeys) -> Self {
        self.shared = keys;
        self
    }

    /// Replace the three focus border chains.
    pub fn with_border_keys<'a>(
        mut self,
        focus_selected: impl IntoIterator<Item = &'a str>,
        focus: impl IntoIterator<Item = &'a str>,
        no_focus: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.focus_selected_border = focus_selected.into_iter().map(str::to_owned).collect();
        self.focus_border = focus.into_iter().map(str::to_owned).collect();
        self.no_focus_border = no_focus.into_iter().map(str::to_owned).collect();
        self
    }

    /// Replace the editor border chain of a host kind.
    pub fn with_editor_border_keys<'a>(
        mut self,
        kind: HostKind,
        keys: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.editor_border
            .insert(kind, keys.into_iter().map(str::to_owned).collect());
        self
    }

    /// Selection keys of a host kind.
    pub fn selection_keys(&self, kind: HostKind) -> Option<&ColorKeys> {
        self.selection.get(&kind)
    }

    /// Keys tried after the host's own colors.
    pub fn shared_keys(&self) -> &ColorKeys {
        &self.shared
    }

    /// Editor border keys of a host kind.
    pub fn editor_border_keys(&self, kind: HostKind) -> &[String] {
        self.editor_border
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn first_color(laf: &LookAndFeel, keys: &[String]) -> Option<Color> {
    laf.first_color(keys.iter().map(String::as_str))
}

fn first_border(laf: &LookAndFeel, keys: &[String]) -> Option<Border> {
    laf.first_border(keys.iter().map(String::as_str))
}

/// The default text appearance of a cell.
#[derive(Debug, Clone)]
pub struct DefaultAppearance {
    laf: Arc<LookAndFeel>,
    keys: FallbackKeys,
}

impl Default for DefaultAppearance {
    fn default() -> Self {
        Self::new(LookAndFeel::current(), FallbackKeys::standard())
    }
}

impl DefaultAppearance {
    /// Create an appearance over a look-and-feel snapshot.
    pub fn new(laf: Arc<LookAndFeel>, keys: FallbackKeys) -> Self {
        Self { laf, keys }
    }

    /// The look-and-feel in use.
    pub fn look_and_feel(&self) -> &LookAndFeel {
        &self.laf
    }

    /// The key chains in use.
    pub fn fallback_keys(&self) -> &FallbackKeys {
        &self.keys
    }

    /// Render `cell` as a text label whose text comes from `text`.
    ///
    /// Editing cells, and cells that already carry a component not created
    /// here, are returned unchanged.
    pub fn apply(&self, cell: Cell, text: &dyn Fn(&Cell) -> String) -> Cell {
        if cell.is_editing() {
            return cell;
        }
        let label = match cell.view() {
            Some(view) if Self::is_internal_label(view) => view.clone(),
            Some(_) => return cell,
            None => ComponentHandle::label("")
                .with(|c| c.set_origin(ComponentOrigin::DefaultAppearance)),
        };

        let (background, foreground) = self.colors(&cell);
        let host = cell.host();
        {
            let mut label = label.borrow_mut();
            label.set_text(text(&cell));
            if cell.is_selected() {
                if background.is_some() {
                    label.set_background(background);
                }
                if foreground.is_some() {
                    label.set_foreground(foreground);
                }
            } else {
                let normal = host.background().map(|base| stripe(base, cell.row()));
                if background.is_some() {
                    label.set_background(normal);
                }
                if foreground.is_some() {
                    label.set_foreground(host.foreground());
                }
            }
            if host.font().is_some() {
                label.set_font(host.font());
            }
            label.set_enabled(host.is_enabled());
            if let Some(border) = self.border(&cell) {
                label.set_border(Some(border));
            }
        }
        cell.with_view(label)
    }

    /// Returns `true` if `view` is a label created by [`apply`](Self::apply).
    pub fn is_internal_label(view: &ComponentHandle) -> bool {
        let view = view.borrow();
        view.origin() == ComponentOrigin::DefaultAppearance && view.kind() == WidgetKind::Label
    }

    /// The resolved background and foreground candidates for `cell`.
    pub fn colors(&self, cell: &Cell) -> (Option<Color>, Option<Color>) {
        let host = cell.host();
        let mut background = None;
        let mut foreground = None;

        match (host.kind(), cell.popup_list()) {
            (HostKind::Combo, Some(list)) => {
                if cell.is_selected() {
                    background = list.selection_background();
                    foreground = list.selection_foreground();
                } else {
                    background = list.background();
                    foreground = list.foreground();
                }
            }
            (HostKind::Combo, None) => {}
            (kind, _) => {
                background = host.selection_background();
                foreground = host.selection_foreground();
                if let Some(keys) = self.keys.selection_keys(kind) {
                    background = background.or_else(|| first_color(&self.laf, &keys.background));
                    foreground = foreground.or_else(|| first_color(&self.laf, &keys.foreground));
                }
            }
        }

        let shared = self.keys.shared_keys();
        let background = background
            .or_else(|| host.background())
            .or_else(|| first_color(&self.laf, &shared.background));
        let foreground = foreground
            .or_else(|| host.foreground())
            .or_else(|| first_color(&self.laf, &shared.foreground));
        (background, foreground)
    }

    /// The border for the focus and selection state of `cell`.
    pub fn border(&self, cell: &Cell) -> Option<Border> {
        if cell.has_focus() {
            let selected = if cell.is_selected() {
                first_border(&self.laf, &self.keys.focus_selected_border)
            } else {
                None
            };
            selected.or_else(|| first_border(&self.laf, &self.keys.focus_border))
        } else {
            first_border(&self.laf, &self.keys.no_focus_border)
        }
    }

    /// The default editor border for a host kind, if the look-and-feel has one.
    pub fn editor_border(&self, kind: HostKind) -> Option<Border> {
        first_border(&self.laf, self.keys.editor_border_keys(kind))
    }
}

/// The background of a non-selected row: odd rows get a contrast shift.
pub fn stripe(base: Color, row: usize) -> Color {
    if row % 2 == 1 {
        base.contrast_shifted()
    } else {
        base
    }
}
