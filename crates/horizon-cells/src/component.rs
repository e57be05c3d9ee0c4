//! Components handed back to the host toolkit as cell renderers and editors.
//!
//! A [`Component`] is a minimal retained widget: one of a handful of
//! [`Widget`] kinds plus the shared visual attributes the dispatch engine
//! manipulates (colors, border, tooltip, size constraints). Components are
//! shared through [`ComponentHandle`], a reference-counted cell, because the
//! same component is cached by an adapter, carried through a [`Cell`](crate::Cell)
//! and returned to the host at the same time.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use horizon_cells_core::logging::targets;
use horizon_cells_core::{Border, Color, Font, Point, Rect, Result, Size};

use crate::value::CellValue;

/// Who created a component.
///
/// Only [`ComponentOrigin::User`] components take part in geometry fitting
/// and are protected from the default appearance resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentOrigin {
    /// Built by a caller-supplied rule.
    #[default]
    User,
    /// The internal text label of the default appearance resolver.
    DefaultAppearance,
    /// The toolkit's own default renderer.
    ToolkitRenderer,
    /// The default editor component installed by the cell editor.
    ToolkitEditor,
}

/// Horizontal content alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// Callback fired by a text field when its action is performed
/// (typically when the user presses Enter). Receives the current text.
#[derive(Clone)]
pub struct ActionListener(Rc<dyn Fn(&str)>);

impl ActionListener {
    /// Wrap a callback.
    pub fn new(callback: impl Fn(&str) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// Invoke the callback.
    pub fn call(&self, text: &str) {
        (self.0)(text);
    }

    /// Returns `true` if both listeners wrap the same callback.
    pub fn ptr_eq(&self, other: &ActionListener) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ActionListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionListener(..)")
    }
}

/// One drawing operation recorded by a [`PaintSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    FillRect { rect: Rect, color: Color },
    Text { text: String, origin: Point, color: Color },
    Line { from: Point, to: Point, color: Color },
    Border { rect: Rect, border: Border },
}

/// A recording paint target.
///
/// The host toolkit replays the recorded operations with its own renderer.
#[derive(Debug, Default)]
pub struct PaintSurface {
    ops: Vec<PaintOp>,
}

impl PaintSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(PaintOp::FillRect { rect, color });
    }

    /// Draw a run of text.
    pub fn draw_text(&mut self, text: impl Into<String>, origin: Point, color: Color) {
        self.ops.push(PaintOp::Text {
            text: text.into(),
            origin,
            color,
        });
    }

    /// Draw a line.
    pub fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.ops.push(PaintOp::Line { from, to, color });
    }

    /// Stroke a border around a rectangle.
    pub fn stroke_border(&mut self, rect: Rect, border: Border) {
        self.ops.push(PaintOp::Border { rect, border });
    }

    /// The recorded operations.
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Number of recorded operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn truncate(&mut self, len: usize) {
        self.ops.truncate(len);
    }
}

/// Custom drawing for canvas components.
pub trait CellPainter {
    /// Paint into `surface` within `bounds`.
    fn paint(&self, surface: &mut PaintSurface, bounds: Rect) -> Result<()>;
}

impl<F> CellPainter for F
where
    F: Fn(&mut PaintSurface, Rect) -> Result<()>,
{
    fn paint(&self, surface: &mut PaintSurface, bounds: Rect) -> Result<()> {
        self(surface, bounds)
    }
}

/// The kind of a [`Widget`], used when reconciling editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Label,
    Toggle,
    Choice,
    TextField,
    Canvas,
}

/// The kind-specific state of a component.
pub enum Widget {
    /// Read-only text.
    Label { text: String },
    /// A check box or toggle button.
    Toggle { text: String, selected: bool },
    /// A drop-down choice.
    Choice {
        items: Vec<CellValue>,
        selected: CellValue,
        editable: bool,
    },
    /// An editable single-line text field.
    TextField {
        text: String,
        action_listeners: Vec<ActionListener>,
    },
    /// Custom drawing.
    Canvas { painter: Rc<dyn CellPainter> },
}

impl Widget {
    /// Gets the kind of this widget.
    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::Label { .. } => WidgetKind::Label,
            Widget::Toggle { .. } => WidgetKind::Toggle,
            Widget::Choice { .. } => WidgetKind::Choice,
            Widget::TextField { .. } => WidgetKind::TextField,
            Widget::Canvas { .. } => WidgetKind::Canvas,
        }
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Widget::Label { text } => f.debug_struct("Label").field("text", text).finish(),
            Widget::Toggle { text, selected } => f
                .debug_struct("Toggle")
                .field("text", text)
                .field("selected", selected)
                .finish(),
            Widget::Choice {
                items,
                selected,
                editable,
            } => f
                .debug_struct("Choice")
                .field("items", items)
                .field("selected", selected)
                .field("editable", editable)
                .finish(),
            Widget::TextField {
                text,
                action_listeners,
            } => f
                .debug_struct("TextField")
                .field("text", text)
                .field("action_listeners", &action_listeners.len())
                .finish(),
            Widget::Canvas { .. } => f.write_str("Canvas"),
        }
    }
}

/// A retained cell component.
#[derive(Debug)]
pub struct Component {
    widget: Widget,
    origin: ComponentOrigin,
    enabled: bool,
    visible: bool,
    background: Option<Color>,
    foreground: Option<Color>,
    font: Option<Font>,
    border: Option<Border>,
    tooltip: Option<String>,
    alignment: Alignment,
    min_size: Option<Size>,
    max_size: Option<Size>,
}

impl Component {
    /// Create a component of the given widget kind.
    pub fn new(widget: Widget) -> Self {
        Self {
            widget,
            origin: ComponentOrigin::User,
            enabled: true,
            visible: true,
            background: None,
            foreground: None,
            font: None,
            border: None,
            tooltip: None,
            alignment: Alignment::Leading,
            min_size: None,
            max_size: None,
        }
    }

    /// Gets the widget state.
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// Gets the widget state mutably.
    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    /// Gets the widget kind.
    pub fn kind(&self) -> WidgetKind {
        self.widget.kind()
    }

    /// Gets the origin.
    pub fn origin(&self) -> ComponentOrigin {
        self.origin
    }

    /// Sets the origin.
    pub fn set_origin(&mut self, origin: ComponentOrigin) {
        self.origin = origin;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn set_foreground(&mut self, color: Option<Color>) {
        self.foreground = color;
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: Option<Font>) {
        self.font = font;
    }

    pub fn border(&self) -> Option<Border> {
        self.border
    }

    pub fn set_border(&mut self, border: Option<Border>) {
        self.border = border;
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn set_tooltip(&mut self, tooltip: Option<String>) {
        self.tooltip = tooltip;
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// The declared minimum size, if any.
    pub fn min_size(&self) -> Option<Size> {
        self.min_size
    }

    pub fn set_min_size(&mut self, size: Option<Size>) {
        self.min_size = size;
    }

    /// The declared maximum size, if any.
    pub fn max_size(&self) -> Option<Size> {
        self.max_size
    }

    pub fn set_max_size(&mut self, size: Option<Size>) {
        self.max_size = size;
    }

    /// The text shown by labels, toggles and text fields.
    pub fn text(&self) -> Option<&str> {
        match &self.widget {
            Widget::Label { text } | Widget::Toggle { text, .. } | Widget::TextField { text, .. } => {
                Some(text)
            }
            Widget::Choice { .. } | Widget::Canvas { .. } => None,
        }
    }

    /// Set the text of labels, toggles and text fields. Ignored by other kinds.
    pub fn set_text(&mut self, new_text: impl Into<String>) {
        match &mut self.widget {
            Widget::Label { text } | Widget::Toggle { text, .. } | Widget::TextField { text, .. } => {
                *text = new_text.into();
            }
            Widget::Choice { .. } | Widget::Canvas { .. } => {}
        }
    }

    /// The toggle state; `None` for non-toggles.
    pub fn is_selected(&self) -> Option<bool> {
        match &self.widget {
            Widget::Toggle { selected, .. } => Some(*selected),
            _ => None,
        }
    }

    /// Set the toggle state. Ignored by other kinds.
    pub fn set_selected(&mut self, value: bool) {
        if let Widget::Toggle { selected, .. } = &mut self.widget {
            *selected = value;
        }
    }

    /// The selected item of a choice.
    pub fn selected_item(&self) -> Option<&CellValue> {
        match &self.widget {
            Widget::Choice { selected, .. } => Some(selected),
            _ => None,
        }
    }

    /// Set the selected item of a choice. Ignored by other kinds.
    pub fn set_selected_item(&mut self, item: CellValue) {
        if let Widget::Choice { selected, .. } = &mut self.widget {
            *selected = item;
        }
    }

    /// Register a text-field action listener. Ignored by other kinds.
    pub fn add_action_listener(&mut self, listener: ActionListener) {
        if let Widget::TextField {
            action_listeners, ..
        } = &mut self.widget
        {
            action_listeners.push(listener);
        }
    }

    /// Remove a text-field action listener.
    pub fn remove_action_listener(&mut self, listener: &ActionListener) {
        if let Widget::TextField {
            action_listeners, ..
        } = &mut self.widget
        {
            action_listeners.retain(|l| !l.ptr_eq(listener));
        }
    }

    /// Number of registered action listeners.
    pub fn action_listener_count(&self) -> usize {
        match &self.widget {
            Widget::TextField {
                action_listeners, ..
            } => action_listeners.len(),
            _ => 0,
        }
    }

    /// Paint the component into `surface`.
    ///
    /// Returns `false` if a custom painter failed. The failure is logged and
    /// everything that painter recorded is discarded, so the component is
    /// simply skipped for this frame.
    pub fn paint(&self, surface: &mut PaintSurface, bounds: Rect) -> bool {
        if !self.visible {
            return true;
        }
        if let Some(background) = self.background {
            surface.fill_rect(bounds, background);
        }
        let foreground = self.foreground.unwrap_or(Color::BLACK);
        let painted = match &self.widget {
            Widget::Label { text } | Widget::TextField { text, .. } => {
                surface.draw_text(text.clone(), bounds.origin, foreground);
                true
            }
            Widget::Toggle { text, selected } => {
                let marker = if *selected { "[x] " } else { "[ ] " };
                surface.draw_text(format!("{marker}{text}"), bounds.origin, foreground);
                true
            }
            Widget::Choice { selected, .. } => {
                surface.draw_text(selected.to_display_string(), bounds.origin, foreground);
                true
            }
            Widget::Canvas { painter } => {
                let mark = surface.len();
                match painter.paint(surface, bounds) {
                    Ok(()) => true,
                    Err(error) => {
                        surface.truncate(mark);
                        tracing::warn!(
                            target: targets::PAINT,
                            %error,
                            "custom cell painter failed; skipping component for this frame"
                        );
                        false
                    }
                }
            }
        };
        if let Some(border) = self.border.filter(Border::is_visible) {
            surface.stroke_border(bounds, border);
        }
        painted
    }
}

/// Shared handle to a [`Component`].
///
/// Equality between handles is identity (see [`ptr_eq`](Self::ptr_eq)).
#[derive(Debug, Clone)]
pub struct ComponentHandle(Rc<RefCell<Component>>);

static_assertions::assert_not_impl_any!(ComponentHandle: Send, Sync);

impl ComponentHandle {
    /// Wrap a component.
    pub fn new(component: Component) -> Self {
        Self(Rc::new(RefCell::new(component)))
    }

    /// A text label.
    pub fn label(text: impl Into<String>) -> Self {
        Self::new(Component::new(Widget::Label { text: text.into() }))
    }

    /// A toggle (check box).
    pub fn toggle(selected: bool) -> Self {
        Self::new(Component::new(Widget::Toggle {
            text: String::new(),
            selected,
        }))
    }

    /// A drop-down choice over `items`.
    pub fn choice(items: impl IntoIterator<Item = CellValue>) -> Self {
        Self::new(Component::new(Widget::Choice {
            items: items.into_iter().collect(),
            selected: CellValue::None,
            editable: false,
        }))
    }

    /// A text field.
    pub fn text_field(text: impl Into<String>) -> Self {
        Self::new(Component::new(Widget::TextField {
            text: text.into(),
            action_listeners: Vec::new(),
        }))
    }

    /// A custom-painted component with a fixed preferred size.
    pub fn canvas(size: Size, painter: impl CellPainter + 'static) -> Self {
        let mut component = Component::new(Widget::Canvas {
            painter: Rc::new(painter),
        });
        component.set_min_size(Some(size));
        Self::new(component)
    }

    /// Immutably borrow the component.
    pub fn borrow(&self) -> Ref<'_, Component> {
        self.0.borrow()
    }

    /// Mutably borrow the component.
    pub fn borrow_mut(&self) -> RefMut<'_, Component> {
        self.0.borrow_mut()
    }

    /// Shortcut for the widget kind.
    pub fn kind(&self) -> WidgetKind {
        self.0.borrow().kind()
    }

    /// Shortcut for the origin.
    pub fn origin(&self) -> ComponentOrigin {
        self.0.borrow().origin()
    }

    /// Shortcut for the text.
    pub fn text(&self) -> Option<String> {
        self.0.borrow().text().map(str::to_owned)
    }

    /// Returns `true` if both handles point to the same component.
    pub fn ptr_eq(&self, other: &ComponentHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Builder-style mutation.
    pub fn with(self, configure: impl FnOnce(&mut Component)) -> Self {
        configure(&mut self.0.borrow_mut());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_cells_core::CellError;

    #[test]
    fn test_text_accessors() {
        let label = ComponentHandle::label("a");
        label.borrow_mut().set_text("b");
        assert_eq!(label.text().as_deref(), Some("b"));

        let choice = ComponentHandle::choice([CellValue::from(1)]);
        choice.borrow_mut().set_text("ignored");
        assert_eq!(choice.text(), None);
    }

    #[test]
    fn test_toggle_and_choice_state() {
        let toggle = ComponentHandle::toggle(false);
        toggle.borrow_mut().set_selected(true);
        assert_eq!(toggle.borrow().is_selected(), Some(true));

        let choice = ComponentHandle::choice([CellValue::from("x"), CellValue::from("y")]);
        choice.borrow_mut().set_selected_item(CellValue::from("y"));
        assert_eq!(choice.borrow().selected_item(), Some(&CellValue::from("y")));
    }

    #[test]
    fn test_action_listeners() {
        let field = ComponentHandle::text_field("");
        let listener = ActionListener::new(|_| {});
        field.borrow_mut().add_action_listener(listener.clone());
        assert_eq!(field.borrow().action_listener_count(), 1);
        field.borrow_mut().remove_action_listener(&listener);
        assert_eq!(field.borrow().action_listener_count(), 0);
    }

    #[test]
    fn test_handle_identity() {
        let a = ComponentHandle::label("x");
        let b = a.clone();
        let c = ComponentHandle::label("x");
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn test_label_paint() {
        let label = ComponentHandle::label("hi")
            .with(|c| c.set_background(Some(Color::WHITE)));
        let mut surface = PaintSurface::new();
        assert!(label.borrow().paint(&mut surface, Rect::new(0.0, 0.0, 50.0, 20.0)));
        assert_eq!(surface.len(), 2);
    }

    #[test]
    fn test_failing_painter_is_contained() {
        let canvas = ComponentHandle::canvas(Size::new(10.0, 10.0), |surface: &mut PaintSurface, bounds: Rect| {
            surface.fill_rect(bounds, Color::RED);
            Err(CellError::paint("boom"))
        });
        let mut surface = PaintSurface::new();
        let painted = canvas.borrow().paint(&mut surface, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(!painted);
        assert!(surface.is_empty());
    }
}
