//! The adapter behind list and combo box callbacks, and the combo box editor.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use horizon_cells_core::logging::targets;
use horizon_cells_core::{DispatchSpan, LookAndFeel};

use super::{CacheSlot, check_type};
use crate::appearance::DefaultAppearance;
use crate::cell::{Cell, CellState, DefaultView};
use crate::component::{ActionListener, ComponentHandle, WidgetKind};
use crate::dispatch;
use crate::host::{CellHost, HostKind};
use crate::rules::RuleStore;
use crate::toolkit::ToolkitRenderer;
use crate::value::{CellValue, ValueType};

/// Renders the entries of one list or combo box.
///
/// Created by [`CellBuilder::list_adapter`](crate::CellBuilder::list_adapter)
/// or [`CellBuilder::combo_adapter`](crate::CellBuilder::combo_adapter).
pub struct ListCellAdapter {
    host: Rc<dyn CellHost>,
    store: Rc<RuleStore>,
    appearance: Rc<DefaultAppearance>,
    toolkit: ToolkitRenderer,
    render_cache: CacheSlot,
}

static_assertions::assert_not_impl_any!(ListCellAdapter: Send, Sync);

impl fmt::Debug for ListCellAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCellAdapter")
            .field("host", &self.host.kind())
            .field("store", &self.store)
            .field("render_cache", &self.render_cache)
            .finish_non_exhaustive()
    }
}

impl ListCellAdapter {
    pub(crate) fn new(
        host: Rc<dyn CellHost>,
        store: Rc<RuleStore>,
        appearance: Rc<DefaultAppearance>,
        laf: Arc<LookAndFeel>,
    ) -> Self {
        Self {
            host,
            store,
            appearance,
            toolkit: ToolkitRenderer::new(laf),
            render_cache: CacheSlot::default(),
        }
    }

    /// The list or combo box owning this adapter.
    pub fn host(&self) -> &Rc<dyn CellHost> {
        &self.host
    }

    /// Gets the element type of the rule store.
    pub fn element_type(&self) -> &'static ValueType {
        self.store.element_type()
    }

    /// Render one entry.
    ///
    /// `list` is the widget doing the painting: the list itself, or the
    /// drop-down list of a combo box. Rules see it as the cell's popup list
    /// while the cell's host stays the owning widget.
    pub fn list_cell_renderer(
        &mut self,
        list: &Rc<dyn CellHost>,
        value: CellValue,
        row: usize,
        selected: bool,
        focused: bool,
    ) -> ComponentHandle {
        let _span = DispatchSpan::new("list_cell_renderer", row, 0);
        check_type(self.store.element_type(), &value);
        let state = CellState::new()
            .with_selected(selected)
            .with_focused(focused)
            .at(row, 0);
        let value_type = value.value_type();

        let toolkit = self.toolkit.clone();
        let default_list = Rc::clone(list);
        let default_value = value.clone();
        let default_view: DefaultView = Rc::new(move || {
            Some(toolkit.render(default_list.as_ref(), &default_value, selected, focused, row))
        });

        let mut cell = Cell::new(Rc::clone(&self.host), value, state)
            .with_appearance(Rc::clone(&self.appearance))
            .with_popup_list(Rc::clone(list))
            .with_default_view(default_view);
        if let Some(cached) = self.render_cache.offer(value_type) {
            cell = cell.with_view(cached);
        }

        let store = Rc::clone(&self.store);
        let rules = store.resolve(cell.value());
        let toolkit = &self.toolkit;
        let outcome = dispatch::run(cell, &rules, &|value: &CellValue| {
            toolkit.render(list.as_ref(), value, selected, focused, row)
        });
        self.render_cache.store(value_type, outcome.custom);
        outcome.component
    }

    /// Build a combo box editor from the stored rules.
    ///
    /// Every rule runs, regardless of its declared type, against an empty
    /// editing cell; after each one only a text-field view is kept. Returns
    /// `None` for list hosts or when no rule produced a text field.
    pub fn establish_combo_editor(&self) -> Option<ComboCellEditor> {
        if self.host.kind() != HostKind::Combo {
            return None;
        }
        let mut cell = Cell::new(
            Rc::clone(&self.host),
            CellValue::None,
            CellState::new().with_editing(true),
        )
        .with_appearance(Rc::clone(&self.appearance));

        for rule in self.store.all_rules() {
            if !rule.matches(&cell) {
                continue;
            }
            let before = cell.clone();
            cell = match rule.configure(cell) {
                Ok(next) => next,
                Err(error) => {
                    tracing::warn!(
                        target: targets::EDITOR,
                        %error,
                        declared_type = rule.declared_type().name(),
                        "failed to establish combo box editor through cell configurator"
                    );
                    before
                }
            };
            cell = cell.update_view(|view| {
                Ok(view.filter(|view| view.kind() == WidgetKind::TextField))
            });
        }

        let editor = cell.view().cloned()?;
        tracing::debug!(target: targets::EDITOR, "established combo box editor");
        Some(ComboCellEditor::new(Some(editor)))
    }
}

/// The editable area of a combo box.
#[derive(Debug)]
pub struct ComboCellEditor {
    editor: ComponentHandle,
    action_listeners: Vec<ActionListener>,
    old_value: CellValue,
}

impl ComboCellEditor {
    /// Wrap `editor`, or a borderless text field when `None`.
    pub fn new(editor: Option<ComponentHandle>) -> Self {
        let editor = editor
            .unwrap_or_else(|| ComponentHandle::text_field("").with(|c| c.set_border(None)));
        Self {
            editor,
            action_listeners: Vec::new(),
            old_value: CellValue::None,
        }
    }

    /// Gets the text field.
    pub fn editor_component(&self) -> &ComponentHandle {
        &self.editor
    }

    /// Replace the text field, moving every action listener to the new one.
    pub fn set_editor_component(&mut self, editor: ComponentHandle) {
        for listener in &self.action_listeners {
            self.editor.borrow_mut().remove_action_listener(listener);
            editor.borrow_mut().add_action_listener(listener.clone());
        }
        self.editor = editor;
    }

    /// Show `item` for editing.
    ///
    /// An absent item clears the text but keeps the previous original value.
    pub fn set_item(&mut self, item: CellValue) {
        let text = item.to_display_string();
        if !item.is_none() {
            self.old_value = item;
        }
        let mut editor = self.editor.borrow_mut();
        if editor.text() != Some(text.as_str()) {
            editor.set_text(text);
        }
    }

    /// The edited item.
    ///
    /// When the original item was not a string, unchanged text gives back
    /// the original item and changed text is parsed with the original item's
    /// type. Otherwise, or when parsing fails, the text itself is returned.
    pub fn item(&self) -> CellValue {
        let text = self.editor.text().unwrap_or_default();
        match &self.old_value {
            CellValue::None | CellValue::String(_) => CellValue::String(text),
            old if text == old.to_display_string() => old.clone(),
            old => old
                .value_type()
                .parse(&text)
                .unwrap_or(CellValue::String(text)),
        }
    }

    pub fn add_action_listener(&mut self, listener: ActionListener) {
        self.editor.borrow_mut().add_action_listener(listener.clone());
        self.action_listeners.push(listener);
    }

    pub fn remove_action_listener(&mut self, listener: &ActionListener) {
        self.action_listeners.retain(|l| !l.ptr_eq(listener));
        self.editor.borrow_mut().remove_action_listener(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_cells_core::Color;

    use crate::value::{DOUBLE, INTEGER, OBJECT};

    struct Combo;

    impl CellHost for Combo {
        fn kind(&self) -> HostKind {
            HostKind::Combo
        }

        fn background(&self) -> Option<Color> {
            Some(Color::WHITE)
        }

        fn foreground(&self) -> Option<Color> {
            Some(Color::BLACK)
        }
    }

    #[test]
    fn test_item_returns_original_when_unchanged() {
        let mut editor = ComboCellEditor::new(None);
        editor.set_item(CellValue::from(42));
        assert_eq!(editor.editor_component().text().as_deref(), Some("42"));
        assert_eq!(editor.item(), CellValue::Int(42));

        editor.editor_component().borrow_mut().set_text("43");
        assert_eq!(editor.item(), CellValue::Int(43));

        editor.editor_component().borrow_mut().set_text("many");
        assert_eq!(editor.item(), CellValue::from("many"));
    }

    #[test]
    fn test_item_for_strings_is_text() {
        let mut editor = ComboCellEditor::new(None);
        editor.set_item(CellValue::from("a"));
        editor.editor_component().borrow_mut().set_text("b");
        assert_eq!(editor.item(), CellValue::from("b"));
    }

    #[test]
    fn test_set_editor_component_moves_listeners() {
        let mut editor = ComboCellEditor::new(None);
        let first = editor.editor_component().clone();
        editor.add_action_listener(ActionListener::new(|_| {}));

        let second = ComponentHandle::text_field("");
        editor.set_editor_component(second.clone());
        assert_eq!(first.borrow().action_listener_count(), 0);
        assert_eq!(second.borrow().action_listener_count(), 1);
        assert!(editor.editor_component().ptr_eq(&second));
    }

    fn store_with(rules: Vec<crate::rules::Rule>) -> Rc<RuleStore> {
        let mut store = RuleStore::new(&OBJECT);
        for rule in rules {
            store.register(rule).unwrap();
        }
        Rc::new(store)
    }

    fn adapter(host: Rc<dyn CellHost>, store: Rc<RuleStore>) -> ListCellAdapter {
        let laf = Arc::new(LookAndFeel::light());
        ListCellAdapter::new(host, store, Rc::new(DefaultAppearance::default()), laf)
    }

    #[test]
    fn test_establish_keeps_only_text_fields() {
        let store = store_with(vec![
            crate::rules::Rule::new(&INTEGER, |_| true, |cell: Cell| {
                Ok(cell.with_view(ComponentHandle::text_field("typed")))
            }),
            crate::rules::Rule::new(&DOUBLE, |_| true, |cell: Cell| {
                Ok(cell.with_view(ComponentHandle::toggle(false)))
            }),
        ]);
        let editor = adapter(Rc::new(Combo), store).establish_combo_editor();
        let text = editor.and_then(|editor| editor.editor_component().text());
        assert_eq!(text.as_deref(), Some("typed"));
    }

    #[test]
    fn test_establish_without_text_field() {
        let store = store_with(vec![crate::rules::Rule::new(&INTEGER, |_| true, |cell: Cell| {
            Ok(cell.with_view(ComponentHandle::toggle(false)))
        })]);
        assert!(adapter(Rc::new(Combo), store).establish_combo_editor().is_none());
    }
}
