//! The generic cell editor owned by a grid adapter.
//!
//! A [`CellEditor`] wraps whichever component the rules chose for editing in
//! an [`EditorDelegate`] that knows how to move values in and out of that
//! kind of component. Swapping in a component of the same kind keeps the
//! delegate; listeners registered by the host live on the editor itself and
//! survive every swap.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use horizon_cells_core::logging::targets;
use horizon_cells_core::{Border, CellError, Color};

use crate::appearance::DefaultAppearance;
use crate::component::{Alignment, ComponentHandle, ComponentOrigin, WidgetKind};
use crate::host::{CellHost, HostKind};
use crate::value::{BOOLEAN, CellValue, NUMBER, OBJECT, STRING, ValueType};

/// Receives editing lifecycle notifications.
pub trait CellEditorListener {
    /// Editing finished and the value was accepted.
    fn editing_stopped(&self) {}

    /// Editing was abandoned.
    fn editing_canceled(&self) {}
}

/// The input event that asks whether editing may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTrigger {
    MouseClick { click_count: u32 },
    MouseDrag,
    Key,
    Programmatic,
}

/// Moves values between the editor and one wrapped component.
#[derive(Debug)]
pub struct EditorDelegate {
    kind: WidgetKind,
    component: RefCell<ComponentHandle>,
    value: RefCell<CellValue>,
}

impl EditorDelegate {
    fn new(component: ComponentHandle) -> Self {
        Self {
            kind: component.kind(),
            component: RefCell::new(component),
            value: RefCell::new(CellValue::None),
        }
    }

    /// The kind of component this delegate handles.
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// The wrapped component.
    pub fn component(&self) -> ComponentHandle {
        self.component.borrow().clone()
    }

    fn replace_component(&self, component: ComponentHandle) {
        *self.component.borrow_mut() = component;
    }

    /// Load a value. `text` is the host's display text for it.
    pub fn set_value(&self, value: &CellValue, text: &str) {
        *self.value.borrow_mut() = value.clone();
        let component = self.component();
        let mut component = component.borrow_mut();
        match self.kind {
            WidgetKind::Toggle => {
                let selected = value
                    .as_bool()
                    .unwrap_or_else(|| value.as_str().is_some_and(|s| s == "true"));
                component.set_selected(selected);
            }
            WidgetKind::Choice => component.set_selected_item(value.clone()),
            WidgetKind::TextField | WidgetKind::Label => component.set_text(text),
            WidgetKind::Canvas => {}
        }
    }

    /// The value currently held by the component.
    ///
    /// Components without input state report the value last loaded.
    pub fn value(&self) -> CellValue {
        let component = self.component();
        let component = component.borrow();
        match self.kind {
            WidgetKind::Toggle => CellValue::Bool(component.is_selected().unwrap_or(false)),
            WidgetKind::Choice => component.selected_item().cloned().unwrap_or_default(),
            WidgetKind::TextField => CellValue::from(component.text().unwrap_or_default()),
            WidgetKind::Label | WidgetKind::Canvas => self.value.borrow().clone(),
        }
    }

    /// Whether the triggering event should also select the cell.
    pub fn should_select_cell(&self, trigger: EditTrigger) -> bool {
        !(self.kind == WidgetKind::Choice && trigger == EditTrigger::MouseDrag)
    }
}

/// The editor behind the table and tree edit callbacks.
pub struct CellEditor {
    host_kind: HostKind,
    appearance: Rc<DefaultAppearance>,
    default_component: Option<ComponentHandle>,
    delegate: Rc<EditorDelegate>,
    click_count_to_start: u32,
    column_type: &'static ValueType,
    converted: CellValue,
    error_border: Option<(ComponentHandle, Option<Border>)>,
    listeners: Vec<Rc<dyn CellEditorListener>>,
}

impl CellEditor {
    /// Create an editor for a table or tree.
    pub fn new(host_kind: HostKind, appearance: Rc<DefaultAppearance>) -> Self {
        let placeholder = ComponentHandle::text_field("")
            .with(|c| c.set_origin(ComponentOrigin::ToolkitEditor));
        Self {
            host_kind,
            appearance,
            default_component: None,
            delegate: Rc::new(EditorDelegate::new(placeholder)),
            click_count_to_start: 2,
            column_type: &STRING,
            converted: CellValue::None,
            error_border: None,
            listeners: Vec::new(),
        }
    }

    /// Install the default component on first use.
    ///
    /// Boolean table columns get a toggle, everything else a text field.
    pub fn ensure_initialized(&mut self, host: &dyn CellHost, column: usize) {
        if self.default_component.is_some() {
            return;
        }
        let is_boolean =
            self.host_kind == HostKind::Table && std::ptr::eq(host.column_type(column), &BOOLEAN);
        let component = if is_boolean {
            ComponentHandle::toggle(false)
        } else {
            ComponentHandle::text_field("")
        };
        let border = self
            .appearance
            .editor_border(self.host_kind)
            .unwrap_or(Border::line(Color::BLACK, 1.0));
        let component = component.with(|c| {
            c.set_origin(ComponentOrigin::ToolkitEditor);
            c.set_border(Some(border));
        });
        tracing::debug!(
            target: targets::EDITOR,
            host = self.host_kind.name(),
            kind = ?component.kind(),
            "installed default cell editor component"
        );
        self.set_editor(&component);
        self.default_component = Some(component);
    }

    /// The default component, once initialized.
    pub fn default_component(&self) -> Option<&ComponentHandle> {
        self.default_component.as_ref()
    }

    /// The current delegate.
    pub fn delegate(&self) -> &Rc<EditorDelegate> {
        &self.delegate
    }

    /// The component being edited.
    pub fn component(&self) -> ComponentHandle {
        self.delegate.component()
    }

    /// Clicks needed before a mouse click starts editing.
    pub fn click_count_to_start(&self) -> u32 {
        self.click_count_to_start
    }

    /// The value type edited text is converted to.
    pub fn column_type(&self) -> &'static ValueType {
        self.column_type
    }

    /// Make `component` the edited component.
    ///
    /// A component of the same kind as the current one is swapped into the
    /// existing delegate; any other kind gets a new delegate.
    pub fn set_editor(&mut self, component: &ComponentHandle) {
        if self.delegate.component().ptr_eq(component) {
            return;
        }
        let kind = component.kind();
        if kind == self.delegate.kind() {
            self.delegate.replace_component(component.clone());
        } else {
            tracing::trace!(
                target: targets::EDITOR,
                from = ?self.delegate.kind(),
                to = ?kind,
                "replacing cell editor delegate"
            );
            self.delegate = Rc::new(EditorDelegate::new(component.clone()));
        }
        self.click_count_to_start = if kind == WidgetKind::TextField { 2 } else { 1 };
    }

    fn uses_default_component(&self) -> bool {
        self.default_component
            .as_ref()
            .is_some_and(|default| default.ptr_eq(&self.delegate.component()))
    }

    fn restore_border(&mut self) {
        if let Some((component, border)) = self.error_border.take() {
            component.borrow_mut().set_border(border);
        }
    }

    /// Prepare the edited component for a table cell and return it.
    ///
    /// `value` is loaded into the component when given; `None` keeps the
    /// component as the rules left it.
    pub fn component_for_table(
        &mut self,
        host: &dyn CellHost,
        value: Option<&CellValue>,
        row: usize,
        column: usize,
    ) -> ComponentHandle {
        self.restore_border();
        let column_type = host.column_type(column);
        self.column_type = if std::ptr::eq(column_type, &OBJECT) {
            &STRING
        } else {
            column_type
        };
        self.converted = CellValue::None;

        if let Some(value) = value {
            self.delegate.set_value(value, &host.value_to_text(value, row));
        }
        if self.uses_default_component() && self.delegate.kind() == WidgetKind::TextField {
            let alignment = if NUMBER.is_ancestor_of(self.column_type) {
                Alignment::Trailing
            } else {
                Alignment::Leading
            };
            self.delegate.component().borrow_mut().set_alignment(alignment);
        }
        self.delegate.component()
    }

    /// Prepare the edited component for a tree node and return it.
    pub fn component_for_tree(
        &mut self,
        host: &dyn CellHost,
        value: Option<&CellValue>,
        row: usize,
    ) -> ComponentHandle {
        self.restore_border();
        if let Some(value) = value {
            self.delegate.set_value(value, &host.value_to_text(value, row));
        }
        self.delegate.component()
    }

    /// The edited value: the converted value for tables, the raw component
    /// value otherwise.
    pub fn cell_editor_value(&self) -> CellValue {
        if self.host_kind == HostKind::Table {
            self.converted.clone()
        } else {
            self.delegate.value()
        }
    }

    /// Whether `trigger` starts editing.
    pub fn is_cell_editable(&self, trigger: EditTrigger) -> bool {
        match trigger {
            EditTrigger::MouseClick { click_count } => click_count >= self.click_count_to_start,
            EditTrigger::MouseDrag | EditTrigger::Key | EditTrigger::Programmatic => true,
        }
    }

    pub fn should_select_cell(&self, trigger: EditTrigger) -> bool {
        self.delegate.should_select_cell(trigger)
    }

    /// Finish editing.
    ///
    /// For tables the component value is converted to the column type first.
    /// Returns `false`, and marks the component with a red border, when the
    /// conversion fails; editing then continues.
    pub fn stop_cell_editing(&mut self) -> bool {
        if self.host_kind == HostKind::Table {
            match self.convert(self.delegate.value()) {
                Some(value) => self.converted = value,
                None => {
                    self.mark_invalid();
                    return false;
                }
            }
        }
        for listener in &self.listeners {
            listener.editing_stopped();
        }
        true
    }

    fn convert(&self, value: CellValue) -> Option<CellValue> {
        let column_type = self.column_type;
        match value {
            CellValue::String(text) if text.is_empty() => {
                if std::ptr::eq(column_type, &STRING) {
                    Some(CellValue::String(text))
                } else {
                    Some(CellValue::None)
                }
            }
            CellValue::String(text) => match column_type.parser() {
                Some(parser) => {
                    let parsed = parser(&text);
                    if parsed.is_none() {
                        let error = CellError::conversion(text, column_type.name());
                        tracing::debug!(target: targets::EDITOR, %error, "rejecting edited text");
                    }
                    parsed
                }
                None => Some(CellValue::String(text)),
            },
            other if other.is_none() || column_type.is_ancestor_of(other.value_type()) => {
                Some(other)
            }
            other => {
                tracing::debug!(
                    target: targets::EDITOR,
                    value_type = other.value_type().name(),
                    column_type = column_type.name(),
                    "edited value is not compatible with the column type"
                );
                None
            }
        }
    }

    fn mark_invalid(&mut self) {
        let component = self.delegate.component();
        if self.error_border.is_none() {
            let previous = component.borrow().border();
            self.error_border = Some((component.clone(), previous));
        }
        component
            .borrow_mut()
            .set_border(Some(Border::line(Color::RED, 1.0)));
    }

    /// Abandon editing.
    pub fn cancel_cell_editing(&mut self) {
        for listener in &self.listeners {
            listener.editing_canceled();
        }
    }

    pub fn add_cell_editor_listener(&mut self, listener: Rc<dyn CellEditorListener>) {
        self.listeners.push(listener);
    }

    pub fn remove_cell_editor_listener(&mut self, listener: &Rc<dyn CellEditorListener>) {
        self.listeners.retain(|l| !Rc::ptr_eq(l, listener));
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for CellEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellEditor")
            .field("host_kind", &self.host_kind)
            .field("delegate", &self.delegate.kind())
            .field("click_count_to_start", &self.click_count_to_start)
            .field("column_type", &self.column_type.name())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
