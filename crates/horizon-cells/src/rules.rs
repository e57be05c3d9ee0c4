//! Rule storage and resolution.
//!
//! Rules are kept per declared type, in the order the types were first
//! registered. Resolution collects the rule lists of every declared type that
//! is an ancestor (or the type itself) of the value's runtime type and then
//! reverses the whole list, so later and more specific registrations are
//! applied last. The fallback rule, added under [`OBJECT`] when the store is
//! finalized, always comes first: every caller rule is applied on top of it.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use horizon_cells_core::logging::targets;
use horizon_cells_core::{CellError, Result};

use crate::cell::Cell;
use crate::value::{CellValue, OBJECT, ValueType};

/// Decides whether a rule applies to a cell.
pub type Predicate = Rc<dyn Fn(&Cell) -> bool>;

/// Produces the cell the next rule sees.
pub type Configurator = Rc<dyn Fn(Cell) -> Result<Cell>>;

/// A registered (declared type, predicate, configurator) triple.
#[derive(Clone)]
pub struct Rule {
    declared_type: &'static ValueType,
    predicate: Predicate,
    configurator: Configurator,
}

impl Rule {
    /// Create a rule.
    pub fn new(
        declared_type: &'static ValueType,
        predicate: impl Fn(&Cell) -> bool + 'static,
        configurator: impl Fn(Cell) -> Result<Cell> + 'static,
    ) -> Self {
        Self::from_parts(declared_type, Rc::new(predicate), Rc::new(configurator))
    }

    /// Create a rule from shared parts.
    pub fn from_parts(
        declared_type: &'static ValueType,
        predicate: Predicate,
        configurator: Configurator,
    ) -> Self {
        Self {
            declared_type,
            predicate,
            configurator,
        }
    }

    /// The declared type.
    pub fn declared_type(&self) -> &'static ValueType {
        self.declared_type
    }

    /// Evaluate the predicate.
    ///
    /// A panicking predicate is logged and counts as not matching.
    pub fn matches(&self, cell: &Cell) -> bool {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.predicate)(cell))) {
            Ok(matches) => matches,
            Err(payload) => {
                tracing::warn!(
                    target: targets::DISPATCH,
                    declared_type = self.declared_type.name(),
                    panic = panic_message(&*payload),
                    "cell predicate panicked; treating the rule as not matching"
                );
                false
            }
        }
    }

    /// Run the configurator.
    ///
    /// A panic is reported as [`CellError::Configure`].
    pub fn configure(&self, cell: Cell) -> Result<Cell> {
        panic::catch_unwind(AssertUnwindSafe(|| (self.configurator)(cell))).unwrap_or_else(|payload| {
            Err(CellError::configure(format!(
                "configurator panicked: {}",
                panic_message(&*payload)
            )))
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic payload")
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("declared_type", &self.declared_type.name())
            .finish_non_exhaustive()
    }
}

/// Append-only rule storage of one builder.
#[derive(Debug)]
pub struct RuleStore {
    element_type: &'static ValueType,
    entries: Vec<(&'static ValueType, Vec<Rule>)>,
    fallback: Option<Rule>,
}

impl RuleStore {
    /// Create an empty store accepting rules for `element_type` and its subtypes.
    pub fn new(element_type: &'static ValueType) -> Self {
        Self {
            element_type,
            entries: Vec::new(),
            fallback: None,
        }
    }

    /// The builder's element type.
    pub fn element_type(&self) -> &'static ValueType {
        self.element_type
    }

    /// Returns `true` once the fallback rule has been added.
    pub fn is_finalized(&self) -> bool {
        self.fallback.is_some()
    }

    /// Total number of rules, including the fallback once finalized.
    pub fn len(&self) -> usize {
        let registered: usize = self.entries.iter().map(|(_, rules)| rules.len()).sum();
        registered + usize::from(self.fallback.is_some())
    }

    /// Returns `true` if no rule has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a rule to its declared type's list.
    ///
    /// # Errors
    ///
    /// [`CellError::InvalidArgument`] if the store is already finalized or
    /// the rule's declared type is not the element type or one of its
    /// subtypes.
    pub fn register(&mut self, rule: Rule) -> Result<()> {
        if self.is_finalized() {
            return Err(CellError::invalid_argument(
                "rule",
                "cannot register rules after an adapter has been built",
            ));
        }
        if !self.element_type.is_ancestor_of(rule.declared_type) {
            return Err(CellError::invalid_argument(
                "value_type",
                format!(
                    "'{}' is not a subtype of the element type '{}'",
                    rule.declared_type, self.element_type
                ),
            ));
        }
        tracing::trace!(
            target: targets::BUILDER,
            declared_type = rule.declared_type.name(),
            "registering cell rule"
        );
        match self
            .entries
            .iter_mut()
            .find(|(ty, _)| std::ptr::eq(*ty, rule.declared_type))
        {
            Some((_, rules)) => rules.push(rule),
            None => self.entries.push((rule.declared_type, vec![rule])),
        }
        Ok(())
    }

    /// Add the fallback rule under [`OBJECT`] and close the store.
    ///
    /// Does nothing if the store is already finalized.
    pub fn finalize(&mut self, fallback: Configurator) {
        if self.is_finalized() {
            return;
        }
        self.fallback = Some(Rule::from_parts(&OBJECT, Rc::new(|_: &Cell| true), fallback));
        tracing::debug!(
            target: targets::BUILDER,
            element_type = self.element_type.name(),
            rules = self.len(),
            "cell rule store finalized"
        );
    }

    /// The rules applying to `value`, in application order.
    pub fn resolve(&self, value: &CellValue) -> Vec<&Rule> {
        let runtime_type = value.value_type();
        let matching = self
            .entries
            .iter()
            .filter(|(ty, _)| ty.is_ancestor_of(runtime_type))
            .flat_map(|(_, rules)| rules.iter());
        let resolved = self.in_application_order(matching);
        tracing::trace!(
            target: targets::DISPATCH,
            runtime_type = runtime_type.name(),
            rules = resolved.len(),
            "resolved cell rules"
        );
        resolved
    }

    /// Every stored rule regardless of type, in application order.
    pub fn all_rules(&self) -> Vec<&Rule> {
        self.in_application_order(self.entries.iter().flat_map(|(_, rules)| rules.iter()))
    }

    fn in_application_order<'a>(
        &'a self,
        registered: impl Iterator<Item = &'a Rule>,
    ) -> Vec<&'a Rule> {
        let mut ordered: Vec<&Rule> = registered.collect();
        ordered.reverse();
        if let Some(fallback) = &self.fallback {
            ordered.insert(0, fallback);
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{INTEGER, NUMBER, STRING};

    fn rule(ty: &'static ValueType) -> Rule {
        Rule::new(ty, |_| true, Ok)
    }

    fn passthrough() -> Configurator {
        Rc::new(|cell: Cell| -> Result<Cell> { Ok(cell) })
    }

    fn names(rules: &[&Rule]) -> Vec<&'static str> {
        rules.iter().map(|r| r.declared_type().name()).collect()
    }

    #[test]
    fn test_resolve_reverses_matching_lists() {
        let mut store = RuleStore::new(&OBJECT);
        store.register(rule(&INTEGER)).unwrap();
        store.register(rule(&STRING)).unwrap();
        store.register(rule(&NUMBER)).unwrap();
        store.register(rule(&INTEGER)).unwrap();
        store.finalize(passthrough());

        let resolved = store.resolve(&CellValue::from(1));
        assert_eq!(names(&resolved), ["Object", "Number", "Integer", "Integer"]);

        let resolved = store.resolve(&CellValue::from("x"));
        assert_eq!(names(&resolved), ["Object", "String"]);
    }

    #[test]
    fn test_absent_value_only_matches_object() {
        let mut store = RuleStore::new(&OBJECT);
        store.register(rule(&STRING)).unwrap();
        store.finalize(passthrough());
        assert_eq!(names(&store.resolve(&CellValue::None)), ["Object"]);
    }

    #[test]
    fn test_fallback_first_even_with_object_rules() {
        let marker: Configurator =
            Rc::new(|cell: Cell| -> Result<Cell> { Ok(cell.with_tooltip("fallback")) });
        let mut store = RuleStore::new(&OBJECT);
        store.register(rule(&OBJECT)).unwrap();
        store.register(rule(&STRING)).unwrap();
        store.finalize(marker);

        let resolved = store.resolve(&CellValue::from("s"));
        assert_eq!(names(&resolved), ["Object", "String", "Object"]);
        assert!(Rc::ptr_eq(&resolved[0].configurator, &store.fallback.as_ref().unwrap().configurator));
        assert_eq!(store.all_rules().len(), 3);
    }

    #[test]
    fn test_register_after_finalize_fails() {
        let mut store = RuleStore::new(&OBJECT);
        store.finalize(passthrough());
        let err = store.register(rule(&STRING)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_register_outside_element_type_fails() {
        let mut store = RuleStore::new(&NUMBER);
        assert!(store.register(rule(&INTEGER)).is_ok());
        assert!(store.register(rule(&STRING)).unwrap_err().is_invalid_argument());
        assert!(store.register(rule(&OBJECT)).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_finalize_once() {
        let mut store = RuleStore::new(&OBJECT);
        store.finalize(passthrough());
        store.finalize(passthrough());
        assert_eq!(store.len(), 1);
        assert!(store.is_finalized());
    }
}
