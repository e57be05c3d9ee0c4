//! Host-facing adapters.
//!
//! An adapter is what a table, tree, list or combo box calls back into. It
//! owns the per-widget caches and runs the shared rule store for every cell.

mod grid;
mod list;

pub use grid::GridCellAdapter;
pub use list::{ComboCellEditor, ListCellAdapter};

use horizon_cells_core::logging::targets;

use crate::component::ComponentHandle;
use crate::value::{CellValue, ValueType};

/// The last component chosen for a value of one runtime type.
#[derive(Debug, Default)]
pub(crate) struct CacheSlot {
    entry: Option<(&'static ValueType, ComponentHandle)>,
}

impl CacheSlot {
    /// The cached component, if it was chosen for the same type.
    pub fn offer(&self, value_type: &'static ValueType) -> Option<ComponentHandle> {
        self.entry
            .as_ref()
            .filter(|(cached, _)| std::ptr::eq(*cached, value_type))
            .map(|(_, component)| component.clone())
    }

    pub fn store(&mut self, value_type: &'static ValueType, component: Option<ComponentHandle>) {
        self.entry = component.map(|component| (value_type, component));
    }
}

/// Log values outside the adapter's element type. They are still dispatched.
pub(crate) fn check_type(element_type: &'static ValueType, value: &CellValue) {
    if !value.is_none() && !element_type.is_ancestor_of(value.value_type()) {
        tracing::debug!(
            target: targets::DISPATCH,
            element_type = element_type.name(),
            value_type = value.value_type().name(),
            "cell value is not of the adapter's element type"
        );
    }
}
