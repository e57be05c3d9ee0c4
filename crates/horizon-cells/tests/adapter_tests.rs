//! Adapter construction, geometry fitting, editing and painting tests.

mod common;

use std::cell::Cell as Counter;
use std::rc::Rc;

use horizon_cells::prelude::*;
use horizon_cells::PaintSurface;

use common::MockHost;

#[derive(Default)]
struct StopCounter {
    stopped: Counter<u32>,
}

impl CellEditorListener for StopCounter {
    fn editing_stopped(&self) {
        self.stopped.set(self.stopped.get() + 1);
    }
}

fn sized(width: f32, height: f32) -> ComponentHandle {
    ComponentHandle::label("sized").with(|c| c.set_min_size(Some(Size::new(width, height))))
}

#[test]
fn test_wrong_host_kind() {
    let err = CellBuilder::for_tree(&OBJECT).table_adapter().unwrap_err();
    assert!(matches!(err, CellError::WrongHostKind { expected: "table", actual: "tree" }));

    let (_, table) = MockHost::table().shared();
    let err = CellBuilder::for_list(&OBJECT).list_adapter(table).unwrap_err();
    assert!(matches!(err, CellError::WrongHostKind { expected: "list", actual: "table" }));

    let (_, list) = MockHost::new(HostKind::List).shared();
    assert!(CellBuilder::for_combo(&OBJECT).combo_adapter(list).is_err());
}

#[test]
fn test_registration_after_finalization() {
    let mut builder = CellBuilder::for_table(&OBJECT);
    let _adapter = builder.table_adapter().unwrap();
    let err = builder.register(&STRING, |_| true, Ok).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_geometry_only_grows() {
    let (host, table) = MockHost::table().shared();
    let mut adapter = CellBuilder::for_table(&OBJECT)
        .when(&INTEGER)
        .as_component(|cell| {
            let size = cell.value().as_int().unwrap_or(0) as f32;
            sized(size, size / 2.0)
        })
        .unwrap()
        .table_adapter()
        .unwrap();

    adapter.table_cell_renderer(&table, CellValue::from(120), false, false, 0, 1);
    assert_eq!(*host.widths.borrow(), [(1, 120.0)]);
    assert_eq!(*host.heights.borrow(), [(0, 60.0)]);

    // Smaller than the 80x20 cell: nothing is shrunk.
    adapter.table_cell_renderer(&table, CellValue::from(30), false, false, 1, 1);
    assert_eq!(host.widths.borrow().len(), 1);
    assert_eq!(host.heights.borrow().len(), 1);
}

#[test]
fn test_geometry_uses_larger_declared_size() {
    let (host, table) = MockHost::table().shared();
    let mut adapter = CellBuilder::for_table(&OBJECT)
        .when(&STRING)
        .as_component(|_| {
            ComponentHandle::label("both").with(|c| {
                c.set_min_size(Some(Size::new(50.0, 40.0)));
                c.set_max_size(Some(Size::new(90.0, 10.0)));
            })
        })
        .unwrap()
        .table_adapter()
        .unwrap();

    adapter.table_cell_renderer(&table, CellValue::from("x"), false, false, 2, 0);
    assert_eq!(*host.widths.borrow(), [(0, 90.0)]);
    assert_eq!(*host.heights.borrow(), [(2, 40.0)]);
}

#[test]
fn test_trees_are_not_fitted() {
    let (host, tree) = MockHost::new(HostKind::Tree).shared();
    let mut adapter = CellBuilder::for_tree(&OBJECT)
        .when(&STRING)
        .as_component(|_| sized(500.0, 500.0))
        .unwrap()
        .tree_adapter()
        .unwrap();

    let component = adapter.tree_cell_renderer(&tree, CellValue::from("node"), false, true, false, 0, false);
    assert_eq!(component.origin(), ComponentOrigin::User);
    assert!(host.widths.borrow().is_empty());
}

#[test]
fn test_tree_rules_see_node_state() {
    let (_, tree) = MockHost::new(HostKind::Tree).shared();
    let mut adapter = CellBuilder::for_tree(&OBJECT)
        .when_matching(&STRING, |cell| cell.is_leaf())
        .as_text(|cell| format!("leaf {}", cell.value_as_string()))
        .unwrap()
        .tree_adapter()
        .unwrap();

    let leaf = adapter.tree_cell_renderer(&tree, CellValue::from("a"), false, false, true, 0, false);
    assert_eq!(leaf.text().as_deref(), Some("leaf a"));
    let branch = adapter.tree_cell_renderer(&tree, CellValue::from("b"), false, true, false, 1, false);
    assert_eq!(branch.text().as_deref(), Some("b"));
}

#[test]
fn test_editor_delegate_reused_for_same_kind() {
    let (_, table) = MockHost::table()
        .with_column_types(vec![&STRING, &BOOLEAN])
        .shared();
    let mut adapter = CellBuilder::for_table(&OBJECT)
        .when_matching(&STRING, |cell| cell.is_editing())
        .as_component(|cell| ComponentHandle::text_field(cell.value_as_string()))
        .unwrap()
        .when_matching(&BOOLEAN, |cell| cell.is_editing())
        .as_component(|cell| ComponentHandle::toggle(cell.value().as_bool() == Some(true)))
        .unwrap()
        .table_adapter()
        .unwrap();

    let counter = Rc::new(StopCounter::default());
    adapter.add_cell_editor_listener(counter.clone());

    let first = adapter.table_cell_editor(&table, CellValue::from("a"), false, 0, 0);
    let delegate = Rc::clone(adapter.editor().delegate());

    let second = adapter.table_cell_editor(&table, CellValue::from("b"), false, 1, 0);
    assert!(!first.ptr_eq(&second));
    assert_eq!(second.text().as_deref(), Some("b"));
    assert!(Rc::ptr_eq(&delegate, adapter.editor().delegate()));

    let toggle = adapter.table_cell_editor(&table, CellValue::from(true), false, 2, 1);
    assert_eq!(toggle.kind(), WidgetKind::Toggle);
    assert!(!Rc::ptr_eq(&delegate, adapter.editor().delegate()));
    assert_eq!(toggle.borrow().is_selected(), Some(true));

    assert!(adapter.stop_cell_editing());
    assert_eq!(counter.stopped.get(), 1);
    assert_eq!(adapter.cell_editor_value(), CellValue::Bool(true));
}

#[test]
fn test_caller_editor_keeps_its_content() {
    let (_, table) = MockHost::table().shared();
    let mut adapter = CellBuilder::for_table(&OBJECT)
        .when_matching(&STRING, |cell| cell.is_editing())
        .as_component(|cell| ComponentHandle::text_field(format!("<{}>", cell.value_as_string())))
        .unwrap()
        .when_matching(&INTEGER, |cell| cell.is_editing())
        .as_(|cell| {
            let shown = format!("#{}", cell.value_as_string());
            Ok(cell.with_view(ComponentHandle::text_field("")).with_presentation(shown))
        })
        .unwrap()
        .table_adapter()
        .unwrap();

    let field = adapter.table_cell_editor(&table, CellValue::from("a"), false, 0, 0);
    assert_eq!(field.text().as_deref(), Some("<a>"));

    let presented = adapter.table_cell_editor(&table, CellValue::from(4), false, 1, 0);
    assert_eq!(presented.text().as_deref(), Some("#4"));

    let (_, tree) = MockHost::new(HostKind::Tree).shared();
    let mut adapter = CellBuilder::for_tree(&OBJECT)
        .when_matching(&STRING, |cell| cell.is_editing())
        .as_component(|cell| ComponentHandle::text_field(format!("<{}>", cell.value_as_string())))
        .unwrap()
        .tree_adapter()
        .unwrap();
    let field = adapter.tree_cell_editor(&tree, CellValue::from("node"), true, false, true, 0);
    assert_eq!(field.text().as_deref(), Some("<node>"));
}

#[test]
fn test_editor_swaps_component_inside_delegate() {
    let (_, table) = MockHost::table().shared();
    let mut adapter = CellBuilder::for_table(&OBJECT)
        .when_matching(&INTEGER, |cell| cell.is_editing())
        .as_component(|_| ComponentHandle::text_field(""))
        .unwrap()
        .table_adapter()
        .unwrap();

    let default = adapter.table_cell_editor(&table, CellValue::from("plain"), false, 0, 0);
    assert_eq!(default.origin(), ComponentOrigin::ToolkitEditor);
    let delegate = Rc::clone(adapter.editor().delegate());

    let custom = adapter.table_cell_editor(&table, CellValue::from(5), false, 0, 0);
    assert_eq!(custom.origin(), ComponentOrigin::User);
    assert!(Rc::ptr_eq(&delegate, adapter.editor().delegate()));
    assert!(adapter.editor().component().ptr_eq(&custom));
}

#[test]
fn test_editor_converts_to_column_type() {
    let (_, table) = MockHost::table()
        .with_column_types(vec![&INTEGER, &DOUBLE, &STRING])
        .shared();
    let mut adapter = CellBuilder::for_table(&OBJECT).table_adapter().unwrap();

    let field = adapter.table_cell_editor(&table, CellValue::from(3), true, 0, 0);
    assert_eq!(field.text().as_deref(), Some("3"));
    assert!(!adapter.is_cell_editable(EditTrigger::MouseClick { click_count: 1 }));
    assert!(adapter.is_cell_editable(EditTrigger::MouseClick { click_count: 2 }));

    field.borrow_mut().set_text("12");
    assert!(adapter.stop_cell_editing());
    assert_eq!(adapter.cell_editor_value(), CellValue::Int(12));

    let field = adapter.table_cell_editor(&table, CellValue::from(1.5), true, 0, 1);
    field.borrow_mut().set_text("2.25");
    assert!(adapter.stop_cell_editing());
    assert_eq!(adapter.cell_editor_value(), CellValue::Float(2.25));
}

#[test]
fn test_invalid_edit_turns_border_red() {
    let (_, table) = MockHost::table().with_column_types(vec![&INTEGER]).shared();
    let mut adapter = CellBuilder::for_table(&OBJECT).table_adapter().unwrap();
    let counter = Rc::new(StopCounter::default());
    adapter.add_cell_editor_listener(counter.clone());

    let field = adapter.table_cell_editor(&table, CellValue::from(3), true, 0, 0);
    let normal = field.borrow().border();
    field.borrow_mut().set_text("three");
    assert!(!adapter.stop_cell_editing());
    assert_eq!(field.borrow().border(), Some(Border::line(Color::RED, 1.0)));
    assert_eq!(counter.stopped.get(), 0);

    field.borrow_mut().set_text("4");
    assert!(adapter.stop_cell_editing());
    assert_eq!(counter.stopped.get(), 1);

    adapter.table_cell_editor(&table, CellValue::from(4), true, 1, 0);
    assert_eq!(field.borrow().border(), normal);
}

#[test]
fn test_boolean_column_gets_toggle_editor() {
    let (_, table) = MockHost::table().with_column_types(vec![&BOOLEAN]).shared();
    let mut adapter = CellBuilder::for_table(&OBJECT).table_adapter().unwrap();
    let toggle = adapter.table_cell_editor(&table, CellValue::from(true), false, 0, 0);
    assert_eq!(toggle.kind(), WidgetKind::Toggle);
    assert_eq!(toggle.borrow().is_selected(), Some(true));
    assert!(adapter.is_cell_editable(EditTrigger::MouseClick { click_count: 1 }));
}

#[test]
fn test_tree_editor() {
    let (_, tree) = MockHost::new(HostKind::Tree).shared();
    let mut adapter = CellBuilder::for_tree(&OBJECT).tree_adapter().unwrap();
    let field = adapter.tree_cell_editor(&tree, CellValue::from("node"), true, false, true, 0);
    assert_eq!(field.text().as_deref(), Some("node"));
    field.borrow_mut().set_text("renamed");
    assert!(adapter.stop_cell_editing());
    assert_eq!(adapter.cell_editor_value(), CellValue::from("renamed"));
}

#[test]
fn test_combo_editor_establishment() {
    let (_, combo) = MockHost::new(HostKind::Combo).shared();
    let adapter = CellBuilder::for_combo(&OBJECT)
        .when_matching(&OBJECT, |cell| cell.is_editing())
        .as_component(|_| ComponentHandle::text_field(""))
        .unwrap()
        .combo_adapter(combo)
        .unwrap();

    let mut editor = adapter.establish_combo_editor().unwrap();
    editor.set_item(CellValue::from(7));
    assert_eq!(editor.item(), CellValue::Int(7));
    editor.editor_component().borrow_mut().set_text("8");
    assert_eq!(editor.item(), CellValue::Int(8));
}

#[test]
fn test_list_adapter_has_no_combo_editor() {
    let (_, list) = MockHost::new(HostKind::List).shared();
    let adapter = CellBuilder::for_list(&OBJECT)
        .when(&OBJECT)
        .as_component(|_| ComponentHandle::text_field(""))
        .unwrap()
        .list_adapter(list)
        .unwrap();
    assert!(adapter.establish_combo_editor().is_none());
}

#[test]
fn test_custom_painter_failure_is_contained() {
    let (_, table) = MockHost::table().shared();
    let mut adapter = CellBuilder::for_table(&OBJECT)
        .when(&INTEGER)
        .render(Size::new(40.0, 16.0), |snapshot, surface, bounds| {
            surface.fill_rect(bounds, Color::GREEN);
            match snapshot.value.as_int() {
                Some(n) if n >= 0 => Ok(()),
                _ => Err(CellError::paint("negative values cannot be drawn")),
            }
        })
        .unwrap()
        .table_adapter()
        .unwrap();

    let bounds = Rect::new(0.0, 0.0, 40.0, 16.0);
    let good = adapter.table_cell_renderer(&table, CellValue::from(3), false, false, 0, 0);
    let mut surface = PaintSurface::new();
    assert!(good.borrow().paint(&mut surface, bounds));
    assert!(!surface.is_empty());

    let bad = adapter.table_cell_renderer(&table, CellValue::from(-3), false, false, 1, 0);
    let mut surface = PaintSurface::new();
    assert!(!bad.borrow().paint(&mut surface, bounds));
    assert!(surface.is_empty());
}
