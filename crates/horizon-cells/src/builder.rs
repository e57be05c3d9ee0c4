//! The declarative rule builder.
//!
//! A [`CellBuilder`] collects rules for one kind of host widget and then
//! produces the adapter that widget calls back into:
//!
//! ```
//! use horizon_cells::prelude::*;
//!
//! let mut builder = CellBuilder::for_table(&OBJECT)
//!     .when(&INTEGER)
//!     .as_text(|cell| format!("{} km/h", cell.value_as_string()))
//!     .unwrap();
//! let adapter = builder.table_adapter().unwrap();
//! assert_eq!(adapter.host_kind(), HostKind::Table);
//! ```

use std::rc::Rc;
use std::sync::Arc;

use horizon_cells_core::logging::targets;
use horizon_cells_core::{CellError, LookAndFeel, Rect, Result, Size};

use crate::adapter::{GridCellAdapter, ListCellAdapter};
use crate::appearance::{DefaultAppearance, FallbackKeys};
use crate::cell::{Cell, CellSnapshot};
use crate::component::{ComponentHandle, PaintSurface};
use crate::host::{CellHost, HostKind};
use crate::rules::{Configurator, Predicate, Rule, RuleStore};
use crate::value::ValueType;

/// Collects rules for one host widget kind.
pub struct CellBuilder {
    host_kind: HostKind,
    store: Rc<RuleStore>,
    laf: Arc<LookAndFeel>,
    keys: FallbackKeys,
}

static_assertions::assert_not_impl_any!(CellBuilder: Send, Sync);

impl CellBuilder {
    fn new(host_kind: HostKind, element_type: &'static ValueType) -> Self {
        Self {
            host_kind,
            store: Rc::new(RuleStore::new(element_type)),
            laf: LookAndFeel::current(),
            keys: FallbackKeys::standard(),
        }
    }

    /// A builder for table cells holding `element_type` values.
    pub fn for_table(element_type: &'static ValueType) -> Self {
        Self::new(HostKind::Table, element_type)
    }

    /// A builder for tree nodes holding `element_type` values.
    pub fn for_tree(element_type: &'static ValueType) -> Self {
        Self::new(HostKind::Tree, element_type)
    }

    /// A builder for list entries holding `element_type` values.
    pub fn for_list(element_type: &'static ValueType) -> Self {
        Self::new(HostKind::List, element_type)
    }

    /// A builder for combo box entries holding `element_type` values.
    pub fn for_combo(element_type: &'static ValueType) -> Self {
        Self::new(HostKind::Combo, element_type)
    }

    /// Use `laf` instead of the installed look-and-feel.
    pub fn with_look_and_feel(mut self, laf: Arc<LookAndFeel>) -> Self {
        self.laf = laf;
        self
    }

    /// Use other look-and-feel key chains for the default appearance.
    pub fn with_fallback_keys(mut self, keys: FallbackKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn host_kind(&self) -> HostKind {
        self.host_kind
    }

    pub fn element_type(&self) -> &'static ValueType {
        self.store.element_type()
    }

    /// Start a rule for values of `value_type` and its subtypes.
    pub fn when(self, value_type: &'static ValueType) -> RenderAs {
        self.when_matching(value_type, |_| true)
    }

    /// Start a rule for values of `value_type` whose cell satisfies `predicate`.
    pub fn when_matching(
        self,
        value_type: &'static ValueType,
        predicate: impl Fn(&Cell) -> bool + 'static,
    ) -> RenderAs {
        RenderAs {
            builder: self,
            value_type,
            predicate: Rc::new(predicate),
        }
    }

    /// Register a rule directly.
    ///
    /// # Errors
    ///
    /// [`CellError::InvalidArgument`] once an adapter has been built, or when
    /// `value_type` is not the element type or one of its subtypes.
    pub fn register(
        &mut self,
        value_type: &'static ValueType,
        predicate: impl Fn(&Cell) -> bool + 'static,
        configurator: impl Fn(Cell) -> Result<Cell> + 'static,
    ) -> Result<()> {
        self.register_rule(Rule::new(value_type, predicate, configurator))
    }

    fn register_rule(&mut self, rule: Rule) -> Result<()> {
        if self.store.is_finalized() {
            return Err(CellError::invalid_argument(
                "rule",
                "cannot register rules after an adapter has been built",
            ));
        }
        let store = Rc::get_mut(&mut self.store).ok_or_else(|| {
            CellError::invalid_argument("rule", "the rule store is shared with an adapter")
        })?;
        store.register(rule)
    }

    fn check_kind(&self, expected: HostKind) -> Result<()> {
        if self.host_kind == expected {
            Ok(())
        } else {
            Err(CellError::wrong_host_kind(expected.name(), self.host_kind.name()))
        }
    }

    /// Close the store with the default text rule and share it.
    fn finalize(&mut self) -> Result<Rc<RuleStore>> {
        if !self.store.is_finalized() {
            let store = Rc::get_mut(&mut self.store).ok_or_else(|| {
                CellError::invalid_argument("rule", "the rule store is shared with an adapter")
            })?;
            let fallback: Configurator = Rc::new(|cell: Cell| -> Result<Cell> {
                let appearance = cell.appearance();
                Ok(appearance.apply(cell, &|cell: &Cell| cell.value_as_string()))
            });
            store.finalize(fallback);
        }
        Ok(Rc::clone(&self.store))
    }

    fn appearance(&self) -> Rc<DefaultAppearance> {
        Rc::new(DefaultAppearance::new(Arc::clone(&self.laf), self.keys.clone()))
    }

    fn check_host(&self, host: &Rc<dyn CellHost>) -> Result<()> {
        if host.kind() == self.host_kind {
            Ok(())
        } else {
            Err(CellError::wrong_host_kind(self.host_kind.name(), host.kind().name()))
        }
    }

    /// Build the adapter for a table.
    ///
    /// # Errors
    ///
    /// [`CellError::WrongHostKind`] if this is not a table builder.
    pub fn table_adapter(&mut self) -> Result<GridCellAdapter> {
        self.check_kind(HostKind::Table)?;
        let store = self.finalize()?;
        tracing::debug!(target: targets::BUILDER, rules = store.len(), "built table cell adapter");
        Ok(GridCellAdapter::new(
            HostKind::Table,
            store,
            self.appearance(),
            Arc::clone(&self.laf),
        ))
    }

    /// Build the adapter for a tree.
    ///
    /// # Errors
    ///
    /// [`CellError::WrongHostKind`] if this is not a tree builder.
    pub fn tree_adapter(&mut self) -> Result<GridCellAdapter> {
        self.check_kind(HostKind::Tree)?;
        let store = self.finalize()?;
        tracing::debug!(target: targets::BUILDER, rules = store.len(), "built tree cell adapter");
        Ok(GridCellAdapter::new(
            HostKind::Tree,
            store,
            self.appearance(),
            Arc::clone(&self.laf),
        ))
    }

    /// Build the adapter for `list`.
    ///
    /// # Errors
    ///
    /// [`CellError::WrongHostKind`] if this is not a list builder or `list`
    /// is not a list.
    pub fn list_adapter(&mut self, list: Rc<dyn CellHost>) -> Result<ListCellAdapter> {
        self.check_kind(HostKind::List)?;
        self.check_host(&list)?;
        let store = self.finalize()?;
        tracing::debug!(target: targets::BUILDER, rules = store.len(), "built list cell adapter");
        Ok(ListCellAdapter::new(
            list,
            store,
            self.appearance(),
            Arc::clone(&self.laf),
        ))
    }

    /// Build the adapter for `combo`.
    ///
    /// # Errors
    ///
    /// [`CellError::WrongHostKind`] if this is not a combo builder or `combo`
    /// is not a combo box.
    pub fn combo_adapter(&mut self, combo: Rc<dyn CellHost>) -> Result<ListCellAdapter> {
        self.check_kind(HostKind::Combo)?;
        self.check_host(&combo)?;
        let store = self.finalize()?;
        tracing::debug!(target: targets::BUILDER, rules = store.len(), "built combo cell adapter");
        Ok(ListCellAdapter::new(
            combo,
            store,
            self.appearance(),
            Arc::clone(&self.laf),
        ))
    }
}

impl std::fmt::Debug for CellBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellBuilder")
            .field("host_kind", &self.host_kind)
            .field("store", &self.store)
            .field("laf", &self.laf.name())
            .finish_non_exhaustive()
    }
}

/// A rule under construction; pick how matching cells are shown.
pub struct RenderAs {
    builder: CellBuilder,
    value_type: &'static ValueType,
    predicate: Predicate,
}

impl RenderAs {
    fn finish(mut self, configurator: Configurator) -> Result<CellBuilder> {
        let rule = Rule::from_parts(self.value_type, self.predicate, configurator);
        self.builder.register_rule(rule)?;
        Ok(self.builder)
    }

    /// Configure matching cells with `configurator`.
    pub fn as_(self, configurator: impl Fn(Cell) -> Result<Cell> + 'static) -> Result<CellBuilder> {
        self.finish(Rc::new(configurator))
    }

    /// Show matching cells as text in the default appearance.
    pub fn as_text(self, text: impl Fn(&Cell) -> String + 'static) -> Result<CellBuilder> {
        self.finish(Rc::new(move |cell: Cell| -> Result<Cell> {
            let appearance = cell.appearance();
            Ok(appearance.apply(cell, &text))
        }))
    }

    /// Show matching cells with the component `component` builds.
    pub fn as_component(
        self,
        component: impl Fn(&Cell) -> ComponentHandle + 'static,
    ) -> Result<CellBuilder> {
        self.finish(Rc::new(move |cell: Cell| -> Result<Cell> {
            let view = component(&cell);
            Ok(cell.with_view(view))
        }))
    }

    /// Paint matching cells with `painter` on a canvas of the given size.
    pub fn render(
        self,
        size: Size,
        painter: impl Fn(&CellSnapshot, &mut PaintSurface, Rect) -> Result<()> + 'static,
    ) -> Result<CellBuilder> {
        let painter = Rc::new(painter);
        self.finish(Rc::new(move |cell: Cell| -> Result<Cell> {
            let painter = Rc::clone(&painter);
            Ok(cell.with_painter(size, move |snapshot: &CellSnapshot, surface: &mut PaintSurface, bounds: Rect| {
                painter(snapshot, surface, bounds)
            }))
        }))
    }
}

impl std::fmt::Debug for RenderAs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderAs")
            .field("value_type", &self.value_type.name())
            .finish_non_exhaustive()
    }
}
