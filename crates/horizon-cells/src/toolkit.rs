//! The toolkit's own default cell renderer.
//!
//! This is what a host widget would show without any rules: one reusable
//! label, filled in per call. Adapters fall back to it when the rules leave
//! no view in the cell.

use std::sync::Arc;

use horizon_cells_core::LookAndFeel;

use crate::component::{Alignment, ComponentHandle, ComponentOrigin};
use crate::host::{CellHost, HostKind};
use crate::value::{CellValue, NUMBER};

/// A reusable label renderer.
#[derive(Debug, Clone)]
pub struct ToolkitRenderer {
    label: ComponentHandle,
    laf: Arc<LookAndFeel>,
}

impl ToolkitRenderer {
    /// Create a renderer reading borders from `laf`.
    pub fn new(laf: Arc<LookAndFeel>) -> Self {
        let label = ComponentHandle::label("").with(|c| c.set_origin(ComponentOrigin::ToolkitRenderer));
        Self { label, laf }
    }

    /// The shared label.
    pub fn label(&self) -> &ComponentHandle {
        &self.label
    }

    /// Fill the label for one cell and return it.
    pub fn render(
        &self,
        host: &dyn CellHost,
        value: &CellValue,
        selected: bool,
        focused: bool,
        row: usize,
    ) -> ComponentHandle {
        let kind = host.kind();
        let prefix = kind.laf_prefix();
        {
            let mut label = self.label.borrow_mut();
            label.set_text(host.value_to_text(value, row));
            if selected {
                label.set_background(host.selection_background().or_else(|| {
                    self.laf.color(&format!("{prefix}.selectionBackground"))
                }));
                label.set_foreground(host.selection_foreground().or_else(|| {
                    self.laf.color(&format!("{prefix}.selectionForeground"))
                }));
            } else {
                label.set_background(host.background());
                label.set_foreground(host.foreground());
            }
            label.set_font(host.font());
            label.set_enabled(host.is_enabled());
            let alignment = if kind == HostKind::Table && NUMBER.is_ancestor_of(value.value_type()) {
                Alignment::Trailing
            } else {
                Alignment::Leading
            };
            label.set_alignment(alignment);

            let focus_key = format!("{prefix}.focusCellHighlightBorder");
            let no_focus_key = format!("{prefix}.cellNoFocusBorder");
            let border = if focused {
                self.laf.first_border([focus_key.as_str(), "List.focusCellHighlightBorder"])
            } else {
                self.laf.first_border([no_focus_key.as_str(), "List.cellNoFocusBorder"])
            };
            label.set_border(border);
        }
        self.label.clone()
    }
}
