//! The per-dispatch cell context handed to rules.
//!
//! A [`Cell`] describes one value at one position of a host widget, together
//! with the output slots rules fill in: the chosen view, a presentation value
//! override and tooltip fragments. Cells are immutable; every `with_*` method
//! returns a modified copy, and configurators return the cell they want the
//! next rule to see.

use std::fmt;
use std::rc::Rc;

use horizon_cells_core::logging::targets;
use horizon_cells_core::{Rect, Result, Size};

use crate::appearance::DefaultAppearance;
use crate::component::{ComponentHandle, PaintSurface};
use crate::host::{CellHost, HostKind};
use crate::value::CellValue;

/// Lazily produces the toolkit's own default component for a cell.
pub type DefaultView = Rc<dyn Fn() -> Option<ComponentHandle>>;

/// Selection, focus and position of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellState {
    /// The cell is selected.
    pub selected: bool,
    /// The cell has keyboard focus.
    pub focused: bool,
    /// The cell is being edited rather than rendered.
    pub editing: bool,
    /// The tree node is expanded.
    pub expanded: bool,
    /// The tree node has no children.
    pub leaf: bool,
    /// Row index.
    pub row: usize,
    /// Column index; always 0 outside tables.
    pub column: usize,
}

impl CellState {
    /// Creates a state at row 0, column 0 with all flags cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selected state.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Sets the focused state.
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Sets the editing state.
    pub fn with_editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    /// Sets the expanded state (for tree nodes).
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Sets whether the node is a leaf (for tree nodes).
    pub fn with_leaf(mut self, leaf: bool) -> Self {
        self.leaf = leaf;
        self
    }

    /// Sets the position.
    pub fn at(mut self, row: usize, column: usize) -> Self {
        self.row = row;
        self.column = column;
        self
    }
}

/// A host-free copy of a cell, handed to custom painters.
#[derive(Debug, Clone)]
pub struct CellSnapshot {
    pub value: CellValue,
    pub presentation: Option<CellValue>,
    pub state: CellState,
}

/// One cell being rendered or edited.
#[derive(Clone)]
pub struct Cell {
    host: Rc<dyn CellHost>,
    popup_list: Option<Rc<dyn CellHost>>,
    value: CellValue,
    state: CellState,
    view: Option<ComponentHandle>,
    tooltips: Vec<String>,
    presentation: Option<CellValue>,
    default_view: Option<DefaultView>,
    appearance: Option<Rc<DefaultAppearance>>,
}

static_assertions::assert_not_impl_any!(Cell: Send, Sync);

impl Cell {
    /// Create a cell without view, presentation or tooltips.
    ///
    /// Adapters attach their own appearance. A cell without one falls back
    /// to the installed look-and-feel when a rule asks for it.
    pub fn new(host: Rc<dyn CellHost>, value: CellValue, state: CellState) -> Self {
        Self {
            host,
            popup_list: None,
            value,
            state,
            view: None,
            tooltips: Vec::new(),
            presentation: None,
            default_view: None,
            appearance: None,
        }
    }

    /// Use another default appearance.
    pub fn with_appearance(mut self, appearance: Rc<DefaultAppearance>) -> Self {
        self.appearance = Some(appearance);
        self
    }

    /// Expose the per-call list of a list or combo box.
    pub fn with_popup_list(mut self, list: Rc<dyn CellHost>) -> Self {
        self.popup_list = Some(list);
        self
    }

    /// Supply the toolkit's default component for [`view_default`](Self::view_default).
    pub fn with_default_view(mut self, default_view: DefaultView) -> Self {
        self.default_view = Some(default_view);
        self
    }

    /// Gets the host widget.
    pub fn host(&self) -> &Rc<dyn CellHost> {
        &self.host
    }

    /// Shortcut for the host widget kind.
    pub fn host_kind(&self) -> HostKind {
        self.host.kind()
    }

    /// The drop-down list of a combo box (or the list itself for list hosts).
    pub fn popup_list(&self) -> Option<&Rc<dyn CellHost>> {
        self.popup_list.as_ref()
    }

    /// Gets the default appearance used by `as_text` rules.
    pub fn appearance(&self) -> Rc<DefaultAppearance> {
        self.appearance
            .clone()
            .unwrap_or_else(|| Rc::new(DefaultAppearance::default()))
    }

    /// Gets the value. [`CellValue::None`] when the model has no value.
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    /// The display text of the value; empty when absent.
    pub fn value_as_string(&self) -> String {
        self.value.to_display_string()
    }

    /// Gets the state.
    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        self.state.selected
    }

    pub fn has_focus(&self) -> bool {
        self.state.focused
    }

    pub fn is_editing(&self) -> bool {
        self.state.editing
    }

    pub fn is_expanded(&self) -> bool {
        self.state.expanded
    }

    pub fn is_leaf(&self) -> bool {
        self.state.leaf
    }

    pub fn row(&self) -> usize {
        self.state.row
    }

    pub fn column(&self) -> usize {
        self.state.column
    }

    /// The chosen view: the renderer while rendering, the editor while editing.
    ///
    /// Before any rule runs this holds the component the adapter cached for
    /// the previous value of the same type, if any.
    pub fn view(&self) -> Option<&ComponentHandle> {
        self.view.as_ref()
    }

    /// Sets the view.
    pub fn with_view(mut self, view: ComponentHandle) -> Self {
        self.view = Some(view);
        self
    }

    /// Clears the view.
    pub fn without_view(mut self) -> Self {
        self.view = None;
        self
    }

    /// Replace the view through a fallible function of the current one.
    ///
    /// On failure the error is logged and the view is cleared.
    pub fn update_view(
        mut self,
        update: impl FnOnce(Option<ComponentHandle>) -> Result<Option<ComponentHandle>>,
    ) -> Self {
        let current = self.view.take();
        self.view = match update(current) {
            Ok(view) => view,
            Err(error) => {
                tracing::warn!(target: targets::DISPATCH, %error, "failed to update cell view");
                None
            }
        };
        self
    }

    /// Use the toolkit's own default component as the view.
    ///
    /// Leaves the cell unchanged when the adapter supplied no default.
    pub fn view_default(self) -> Self {
        let default = self.default_view.as_ref().and_then(|supplier| supplier());
        match default {
            Some(view) => self.with_view(view),
            None => self,
        }
    }

    /// Use a custom-painted view of the given size.
    ///
    /// The painter sees a [`CellSnapshot`] of this cell as it is now.
    pub fn with_painter<F>(self, size: Size, painter: F) -> Self
    where
        F: Fn(&CellSnapshot, &mut PaintSurface, Rect) -> Result<()> + 'static,
    {
        let snapshot = self.snapshot();
        let view = ComponentHandle::canvas(size, move |surface: &mut PaintSurface, bounds: Rect| {
            painter(&snapshot, surface, bounds)
        });
        self.with_view(view)
    }

    /// A host-free copy of the value, presentation and state.
    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            value: self.value.clone(),
            presentation: self.presentation.clone(),
            state: self.state,
        }
    }

    /// Tooltip fragments added so far.
    pub fn tooltips(&self) -> &[String] {
        &self.tooltips
    }

    /// Add a tooltip fragment.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltips.push(tooltip.into());
        self
    }

    /// The presentation value override.
    pub fn presentation(&self) -> Option<&CellValue> {
        self.presentation.as_ref()
    }

    /// Show `value` instead of the model value.
    pub fn with_presentation(mut self, value: impl Into<CellValue>) -> Self {
        self.presentation = Some(value.into());
        self
    }

    /// Derive the presentation value from the model value.
    ///
    /// On failure the error is logged and the cell is returned unchanged.
    pub fn map_presentation(self, present: impl FnOnce(&CellValue) -> Result<CellValue>) -> Self {
        match present(&self.value) {
            Ok(value) => self.with_presentation(value),
            Err(error) => {
                tracing::warn!(
                    target: targets::DISPATCH,
                    %error,
                    "failed to convert cell value to presentation value"
                );
                self
            }
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("host", &self.host.kind())
            .field("value", &self.value)
            .field("state", &self.state)
            .field("view", &self.view)
            .field("tooltips", &self.tooltips)
            .field("presentation", &self.presentation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_cells_core::{CellError, Color};

    struct Plain;

    impl CellHost for Plain {
        fn kind(&self) -> HostKind {
            HostKind::List
        }

        fn background(&self) -> Option<Color> {
            Some(Color::WHITE)
        }

        fn foreground(&self) -> Option<Color> {
            Some(Color::BLACK)
        }
    }

    fn cell(value: impl Into<CellValue>) -> Cell {
        Cell::new(Rc::new(Plain), value.into(), CellState::new().at(3, 0))
    }

    #[test]
    fn test_with_methods_copy() {
        let original = cell(7);
        let changed = original.clone().with_tooltip("a").with_presentation("seven");
        assert!(original.tooltips().is_empty());
        assert!(original.presentation().is_none());
        assert_eq!(changed.tooltips(), ["a"]);
        assert_eq!(changed.presentation(), Some(&CellValue::from("seven")));
        assert_eq!(changed.row(), 3);
    }

    #[test]
    fn test_attached_appearance_is_shared() {
        let appearance = Rc::new(DefaultAppearance::default());
        let c = cell(1).with_appearance(Rc::clone(&appearance));
        assert!(Rc::ptr_eq(&c.appearance(), &appearance));
        assert!(Rc::ptr_eq(&c.clone().with_tooltip("t").appearance(), &appearance));
    }

    #[test]
    fn test_update_view_failure_clears() {
        let c = cell("x").with_view(ComponentHandle::label("x"));
        let c = c.update_view(|_| Err(CellError::configure("nope")));
        assert!(c.view().is_none());
    }

    #[test]
    fn test_update_view_filter() {
        let c = cell("x").with_view(ComponentHandle::text_field("x"));
        let c = c.update_view(|view| Ok(view.filter(|v| v.text().is_some())));
        assert!(c.view().is_some());
    }

    #[test]
    fn test_view_default_without_supplier() {
        let c = cell(1).view_default();
        assert!(c.view().is_none());

        let supplier: DefaultView = Rc::new(|| Some(ComponentHandle::label("default")));
        let c = cell(1).with_default_view(supplier).view_default();
        assert_eq!(c.view().and_then(|v| v.text()).as_deref(), Some("default"));
    }

    #[test]
    fn test_map_presentation_failure_keeps_cell() {
        let c = cell(5).map_presentation(|_| Err(CellError::configure("bad")));
        assert!(c.presentation().is_none());
        let c = cell(5).map_presentation(|v| Ok(CellValue::from(format!("#{v}"))));
        assert_eq!(c.presentation(), Some(&CellValue::from("#5")));
    }

    #[test]
    fn test_painter_snapshot() {
        let c = cell(2).with_painter(Size::new(4.0, 4.0), |snapshot, surface, bounds| {
            assert_eq!(snapshot.value, CellValue::from(2));
            surface.fill_rect(bounds, Color::RED);
            Ok(())
        });
        let view = c.view().cloned();
        assert!(view.is_some_and(|v| v.borrow().min_size() == Some(Size::new(4.0, 4.0))));
    }
}
