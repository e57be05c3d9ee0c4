//! The adapter behind table and tree callbacks.

use std::rc::Rc;
use std::sync::Arc;

use horizon_cells_core::logging::targets;
use horizon_cells_core::{DispatchSpan, LookAndFeel};

use super::{CacheSlot, check_type};
use crate::appearance::DefaultAppearance;
use crate::cell::{Cell, CellState, DefaultView};
use crate::component::{ComponentHandle, ComponentOrigin};
use crate::dispatch::{self, Outcome};
use crate::editor::{CellEditor, CellEditorListener, EditTrigger};
use crate::host::{CellHost, HostKind};
use crate::rules::RuleStore;
use crate::toolkit::ToolkitRenderer;
use crate::value::{CellValue, ValueType};

/// Renders and edits the cells of one table or tree.
///
/// Created by [`CellBuilder::table_adapter`](crate::CellBuilder::table_adapter)
/// or [`CellBuilder::tree_adapter`](crate::CellBuilder::tree_adapter).
#[derive(Debug)]
pub struct GridCellAdapter {
    host_kind: HostKind,
    store: Rc<RuleStore>,
    appearance: Rc<DefaultAppearance>,
    toolkit: ToolkitRenderer,
    editor: CellEditor,
    render_cache: CacheSlot,
    edit_cache: CacheSlot,
}

static_assertions::assert_not_impl_any!(GridCellAdapter: Send, Sync);

impl GridCellAdapter {
    pub(crate) fn new(
        host_kind: HostKind,
        store: Rc<RuleStore>,
        appearance: Rc<DefaultAppearance>,
        laf: Arc<LookAndFeel>,
    ) -> Self {
        let editor = CellEditor::new(host_kind, appearance.clone());
        Self {
            host_kind,
            store,
            appearance,
            toolkit: ToolkitRenderer::new(laf),
            editor,
            render_cache: CacheSlot::default(),
            edit_cache: CacheSlot::default(),
        }
    }

    /// Gets the host kind (table or tree).
    pub fn host_kind(&self) -> HostKind {
        self.host_kind
    }

    /// Gets the element type of the rule store.
    pub fn element_type(&self) -> &'static ValueType {
        self.store.element_type()
    }

    /// Gets the cell editor.
    pub fn editor(&self) -> &CellEditor {
        &self.editor
    }

    /// Render one table cell.
    pub fn table_cell_renderer(
        &mut self,
        table: &Rc<dyn CellHost>,
        value: CellValue,
        selected: bool,
        focused: bool,
        row: usize,
        column: usize,
    ) -> ComponentHandle {
        let _span = DispatchSpan::new("table_cell_renderer", row, column);
        let state = CellState::new()
            .with_selected(selected)
            .with_focused(focused)
            .at(row, column);
        let component = self.render(table, value, state);
        self.fit(table.as_ref(), &component, row, column);
        component
    }

    /// Produce the editor component for one table cell.
    pub fn table_cell_editor(
        &mut self,
        table: &Rc<dyn CellHost>,
        value: CellValue,
        selected: bool,
        row: usize,
        column: usize,
    ) -> ComponentHandle {
        let _span = DispatchSpan::new("table_cell_editor", row, column);
        let state = CellState::new()
            .with_selected(selected)
            .with_editing(true)
            .at(row, column);
        let outcome = self.edit(table, value, state);
        let entry = editor_entry(&outcome);
        let component = self
            .editor
            .component_for_table(table.as_ref(), entry.as_ref(), row, column);
        self.fit(table.as_ref(), &component, row, column);
        component
    }

    /// Render one tree node.
    #[allow(clippy::too_many_arguments)]
    pub fn tree_cell_renderer(
        &mut self,
        tree: &Rc<dyn CellHost>,
        value: CellValue,
        selected: bool,
        expanded: bool,
        leaf: bool,
        row: usize,
        focused: bool,
    ) -> ComponentHandle {
        let _span = DispatchSpan::new("tree_cell_renderer", row, 0);
        let state = CellState::new()
            .with_selected(selected)
            .with_focused(focused)
            .with_expanded(expanded)
            .with_leaf(leaf)
            .at(row, 0);
        self.render(tree, value, state)
    }

    /// Produce the editor component for one tree node.
    pub fn tree_cell_editor(
        &mut self,
        tree: &Rc<dyn CellHost>,
        value: CellValue,
        selected: bool,
        expanded: bool,
        leaf: bool,
        row: usize,
    ) -> ComponentHandle {
        let _span = DispatchSpan::new("tree_cell_editor", row, 0);
        let state = CellState::new()
            .with_selected(selected)
            .with_editing(true)
            .with_expanded(expanded)
            .with_leaf(leaf)
            .at(row, 0);
        let outcome = self.edit(tree, value, state);
        let entry = editor_entry(&outcome);
        self.editor.component_for_tree(tree.as_ref(), entry.as_ref(), row)
    }

    pub fn cell_editor_value(&self) -> CellValue {
        self.editor.cell_editor_value()
    }

    pub fn is_cell_editable(&self, trigger: EditTrigger) -> bool {
        self.editor.is_cell_editable(trigger)
    }

    pub fn should_select_cell(&self, trigger: EditTrigger) -> bool {
        self.editor.should_select_cell(trigger)
    }

    /// See [`CellEditor::stop_cell_editing`].
    pub fn stop_cell_editing(&mut self) -> bool {
        self.editor.stop_cell_editing()
    }

    pub fn cancel_cell_editing(&mut self) {
        self.editor.cancel_cell_editing();
    }

    pub fn add_cell_editor_listener(&mut self, listener: Rc<dyn CellEditorListener>) {
        self.editor.add_cell_editor_listener(listener);
    }

    pub fn remove_cell_editor_listener(&mut self, listener: &Rc<dyn CellEditorListener>) {
        self.editor.remove_cell_editor_listener(listener);
    }

    fn cell(&self, host: &Rc<dyn CellHost>, value: CellValue, state: CellState) -> Cell {
        check_type(self.store.element_type(), &value);
        Cell::new(Rc::clone(host), value, state).with_appearance(Rc::clone(&self.appearance))
    }

    fn render(&mut self, host: &Rc<dyn CellHost>, value: CellValue, state: CellState) -> ComponentHandle {
        let value_type = value.value_type();
        let toolkit = self.toolkit.clone();
        let default_host = Rc::clone(host);
        let default_value = value.clone();
        let default_view: DefaultView = Rc::new(move || {
            Some(toolkit.render(
                default_host.as_ref(),
                &default_value,
                state.selected,
                state.focused,
                state.row,
            ))
        });

        let mut cell = self.cell(host, value, state).with_default_view(default_view);
        if let Some(cached) = self.render_cache.offer(value_type) {
            cell = cell.with_view(cached);
        }

        let store = Rc::clone(&self.store);
        let rules = store.resolve(cell.value());
        let toolkit = &self.toolkit;
        let outcome = dispatch::run(cell, &rules, &|value: &CellValue| {
            toolkit.render(host.as_ref(), value, state.selected, state.focused, state.row)
        });
        self.render_cache.store(value_type, outcome.custom);
        outcome.component
    }

    fn edit(&mut self, host: &Rc<dyn CellHost>, value: CellValue, state: CellState) -> Outcome {
        self.editor.ensure_initialized(host.as_ref(), state.column);
        let value_type = value.value_type();
        let fallback = self
            .editor
            .default_component()
            .cloned()
            .unwrap_or_else(|| self.editor.component());
        let default_component = fallback.clone();
        let default_view: DefaultView = Rc::new(move || Some(default_component.clone()));

        let mut cell = self.cell(host, value, state).with_default_view(default_view);
        if let Some(cached) = self.edit_cache.offer(value_type) {
            cell = cell.with_view(cached);
        }

        let store = Rc::clone(&self.store);
        let rules = store.resolve(cell.value());
        let outcome = dispatch::run(cell, &rules, &|_: &CellValue| fallback.clone());
        self.edit_cache.store(value_type, outcome.custom.clone());
        self.editor.set_editor(&outcome.component);
        outcome
    }

    /// Grow the column and row of a table cell to fit a caller component.
    ///
    /// The desired size is the larger of the component's declared minimum
    /// and maximum sizes. Cells only ever grow.
    fn fit(&self, table: &dyn CellHost, component: &ComponentHandle, row: usize, column: usize) {
        if self.host_kind != HostKind::Table {
            return;
        }
        let (origin, min, max) = {
            let component = component.borrow();
            (component.origin(), component.min_size(), component.max_size())
        };
        if origin != ComponentOrigin::User {
            return;
        }
        let desired = match (min, max) {
            (Some(min), Some(max)) => min.max(max),
            (Some(size), None) | (None, Some(size)) => size,
            (None, None) => return,
        };
        let bounds = table.cell_rect(row, column);
        if desired.width > bounds.width() {
            tracing::trace!(
                target: targets::DISPATCH,
                column,
                width = desired.width,
                "growing column to fit cell component"
            );
            table.set_column_width(column, desired.width);
        }
        if desired.height > bounds.height() {
            tracing::trace!(
                target: targets::DISPATCH,
                row,
                height = desired.height,
                "growing row to fit cell component"
            );
            table.set_row_height(row, desired.height);
        }
    }
}

/// The value to load into the editor: the presentation override, or the
/// model value when no caller component was chosen. A caller component
/// without a presentation is used as the rules left it.
fn editor_entry(outcome: &Outcome) -> Option<CellValue> {
    match (outcome.cell.presentation(), &outcome.custom) {
        (Some(presentation), _) => Some(presentation.clone()),
        (None, Some(view)) if view.origin() == ComponentOrigin::User => None,
        (None, _) => Some(outcome.cell.value().clone()),
    }
}
