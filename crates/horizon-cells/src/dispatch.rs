//! The rule application loop.

use horizon_cells_core::logging::targets;

use crate::cell::Cell;
use crate::component::{ComponentHandle, Widget};
use crate::rules::Rule;
use crate::value::CellValue;

/// The result of one dispatch.
#[derive(Debug)]
pub(crate) struct Outcome {
    /// The component handed back to the host.
    pub component: ComponentHandle,
    /// The component the rules chose, if any.
    pub custom: Option<ComponentHandle>,
    /// The final cell.
    pub cell: Cell,
}

/// Apply `rules` in order to `initial`.
///
/// A rule whose predicate holds replaces the cell by its configurator's
/// result. A configurator error or panic is logged and the cell reverts to
/// what it was before that rule; a panicking predicate skips its rule.
pub fn apply(initial: Cell, rules: &[&Rule]) -> Cell {
    let mut cell = initial;
    for rule in rules {
        if !rule.matches(&cell) {
            continue;
        }
        let before = cell.clone();
        cell = match rule.configure(cell) {
            Ok(next) => next,
            Err(error) => {
                tracing::warn!(
                    target: targets::DISPATCH,
                    %error,
                    declared_type = rule.declared_type().name(),
                    row = before.row(),
                    column = before.column(),
                    "cell configurator failed; keeping the cell as it was before this rule"
                );
                before
            }
        };
    }
    cell
}

/// Run the whole dispatch for `cell`.
///
/// `default` renders a value with the toolkit's default component; it is
/// used when no rule chose a component.
pub(crate) fn run(
    cell: Cell,
    rules: &[&Rule],
    default: &dyn Fn(&CellValue) -> ComponentHandle,
) -> Outcome {
    if let Some(view) = cell.view() {
        reset_view(view, cell.value());
    }
    let cell = apply(cell, rules);

    let custom = cell.view().cloned();
    let component = match &custom {
        Some(view) => {
            if let Some(presentation) = cell.presentation() {
                present(view, presentation);
            }
            view.clone()
        }
        None => default(cell.presentation().unwrap_or(cell.value())),
    };
    component
        .borrow_mut()
        .set_tooltip(join_tooltips(cell.tooltips()));

    Outcome {
        component,
        custom,
        cell,
    }
}

/// Bring a reused component back to a neutral state showing `value`.
pub(crate) fn reset_view(view: &ComponentHandle, value: &CellValue) {
    {
        let mut view = view.borrow_mut();
        view.set_enabled(true);
        view.set_visible(true);
        view.set_selected(false);
    }
    present(view, value);
}

/// Push `value` into `view` the way its kind displays values.
pub(crate) fn present(view: &ComponentHandle, value: &CellValue) {
    let mut view = view.borrow_mut();
    match view.widget_mut() {
        Widget::Toggle { text, selected } => match value {
            CellValue::Bool(value) => *selected = *value,
            CellValue::String(value) => *text = value.clone(),
            _ => {}
        },
        Widget::Choice { selected, .. } => *selected = value.clone(),
        Widget::Label { text } | Widget::TextField { text, .. } => {
            *text = value.to_display_string();
        }
        Widget::Canvas { .. } => {}
    }
}

/// Join non-empty tooltip fragments with `"; "`.
pub(crate) fn join_tooltips(fragments: &[String]) -> Option<String> {
    let joined = fragments
        .iter()
        .filter(|fragment| !fragment.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("; ");
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use horizon_cells_core::{CellError, Color};

    use crate::cell::CellState;
    use crate::host::{CellHost, HostKind};
    use crate::value::{OBJECT, STRING};

    struct List;

    impl CellHost for List {
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
        Cell::new(Rc::new(List), value.into(), CellState::new())
    }

    fn default_label(value: &CellValue) -> ComponentHandle {
        ComponentHandle::label(format!("default {value}"))
    }

    #[test]
    fn test_join_tooltips() {
        let fragments = ["a".to_owned(), String::new(), "b".to_owned()];
        assert_eq!(join_tooltips(&fragments).as_deref(), Some("a; b"));
        assert_eq!(join_tooltips(&[String::new()]), None);
    }

    #[test]
    fn test_predicate_false_skips_rule() {
        let skipped = Rule::new(&OBJECT, |_| false, |cell: Cell| Ok(cell.with_tooltip("no")));
        let taken = Rule::new(&OBJECT, |_| true, |cell: Cell| Ok(cell.with_tooltip("yes")));
        let cell = apply(cell(1), &[&skipped, &taken]);
        assert_eq!(cell.tooltips(), ["yes"]);
    }

    #[test]
    fn test_failing_configurator_restores_cell() {
        let first = Rule::new(&OBJECT, |_| true, |cell: Cell| Ok(cell.with_tooltip("first")));
        let failing = Rule::new(&OBJECT, |_| true, |_: Cell| -> horizon_cells_core::Result<Cell> {
            Err(CellError::configure("broken"))
        });
        let last = Rule::new(&STRING, |_| true, |cell: Cell| Ok(cell.with_tooltip("last")));
        let cell = apply(cell("x"), &[&first, &failing, &last]);
        assert_eq!(cell.tooltips(), ["first", "last"]);
    }

    #[test]
    fn test_panicking_rules_are_contained() {
        let first = Rule::new(&OBJECT, |_| true, |cell: Cell| Ok(cell.with_tooltip("first")));
        let bad_predicate = Rule::new(
            &OBJECT,
            |cell: &Cell| cell.tooltips()[5].is_empty(),
            |cell: Cell| Ok(cell.with_tooltip("skipped")),
        );
        let bad_configurator = Rule::new(&OBJECT, |_| true, |cell: Cell| {
            let empty: Vec<String> = Vec::new();
            Ok(cell.with_tooltip(empty[0].clone()))
        });
        let last = Rule::new(&STRING, |_| true, |cell: Cell| Ok(cell.with_tooltip("last")));
        let cell = apply(cell("x"), &[&first, &bad_predicate, &bad_configurator, &last]);
        assert_eq!(cell.tooltips(), ["first", "last"]);
    }

    #[test]
    fn test_default_renders_presentation() {
        let rule = Rule::new(&OBJECT, |_| true, |cell: Cell| Ok(cell.with_presentation("shown")));
        let outcome = run(cell("model"), &[&rule], &default_label);
        assert!(outcome.custom.is_none());
        assert_eq!(outcome.component.text().as_deref(), Some("default shown"));

        let outcome = run(cell("model"), &[], &default_label);
        assert_eq!(outcome.component.text().as_deref(), Some("default model"));
    }

    #[test]
    fn test_presentation_pushed_into_view() {
        let rule = Rule::new(&OBJECT, |_| true, |cell: Cell| {
            Ok(cell.with_view(ComponentHandle::toggle(false)).with_presentation(true))
        });
        let outcome = run(cell("model"), &[&rule], &default_label);
        assert_eq!(outcome.component.borrow().is_selected(), Some(true));
    }

    #[test]
    fn test_tooltip_set_on_component() {
        let rule = Rule::new(&OBJECT, |_| true, |cell: Cell| {
            Ok(cell.with_tooltip("one").with_tooltip("two"))
        });
        let outcome = run(cell(3), &[&rule], &default_label);
        assert_eq!(outcome.component.borrow().tooltip(), Some("one; two"));
    }

    #[test]
    fn test_reused_view_is_reset() {
        let cached = ComponentHandle::toggle(true).with(|c| {
            c.set_enabled(false);
            c.set_visible(false);
        });
        let outcome = run(cell(false).with_view(cached.clone()), &[], &default_label);
        assert!(outcome.component.ptr_eq(&cached));
        let view = cached.borrow();
        assert!(view.is_enabled());
        assert!(view.is_visible());
        assert_eq!(view.is_selected(), Some(false));
    }
}
