//! Textarea Primitive - Auto-sizing multi-line text widget.
//!
//! A custom widget wrapping the host's native multi-line text control. The
//! widget always resizes itself to exactly fit its content and notifies
//! subscribers of every size change, so the editor's view layer can reflow
//! the surrounding layout.
//!
//! A value may be assigned before the widget is attached to the page; it is
//! buffered and flushed once the underlying control exists.
//!
//! # Example
//!
//! ```ignore
//! use scrawl_shell::primitives::AutoSizeTextWidget;
//!
//! let mut widget = AutoSizeTextWidget::with_class("note");
//! widget.on_size_change(|size| println!("{}x{}", size.width, size.height));
//!
//! widget.attach();
//! widget.set_value("hello");
//! ```

use crate::layout::text_measure::content_size;
use crate::state::focus::{self, ElementId, FocusRole};
use crate::types::Size;

/// Tag name the widget is addressed by in the editor's rendered markup.
pub const WIDGET_TAG: &str = "scrawl-widget-textarea";

/// Probe size the control is shrunk to before each measurement.
const SIZE_PROBE: u16 = 1;

/// Padding added to each axis of the measured extent, so the content never
/// sits exactly at the clipping boundary.
const SCROLL_PADDING: u16 = 1;

/// Identifier of a size-change subscription.
pub type SubscriptionId = usize;

// =============================================================================
// Native control
// =============================================================================

/// The host platform's multi-line text control.
///
/// Scroll extents carry the platform's semantics: they report the size
/// needed to show all content without scrolling, but never less than the
/// control's current box. A box that is never shrunk therefore never
/// reports a smaller extent when content is deleted.
#[derive(Debug, Default)]
pub struct NativeTextArea {
    value: String,
    class: Option<String>,
    width: u16,
    height: u16,
}

impl NativeTextArea {
    fn new(class: Option<String>) -> Self {
        Self {
            value: String::new(),
            class,
            width: 0,
            height: 0,
        }
    }

    /// The text currently shown by the control.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Styling class relocated from the wrapping widget, if any.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// The control's current visible box.
    pub fn box_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Horizontal extent needed to show all content without scrolling.
    pub fn scroll_width(&self) -> u16 {
        self.width.max(content_size(&self.value).width)
    }

    /// Vertical extent needed to show all content without scrolling.
    pub fn scroll_height(&self) -> u16 {
        self.height.max(content_size(&self.value).height)
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

// =============================================================================
// Auto-size widget
// =============================================================================

/// Auto-growing monospace text box.
///
/// Lifecycle: constructed detached; `attach` builds the native control and
/// flushes any value assigned early; `detach` tears the subtree down. Every
/// value assignment while attached runs one measure/resize/notify cycle.
pub struct AutoSizeTextWidget {
    class: Option<String>,
    textarea: Option<NativeTextArea>,
    element: Option<ElementId>,
    cached_value: Option<String>,
    size: Size,
    size_listeners: Vec<(SubscriptionId, Box<dyn Fn(Size)>)>,
    next_listener_id: SubscriptionId,
}

impl AutoSizeTextWidget {
    /// Create a detached widget with no styling class.
    pub fn new() -> Self {
        Self {
            class: None,
            textarea: None,
            element: None,
            cached_value: None,
            size: Size::ZERO,
            size_listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Create a detached widget carrying a styling class on the wrapper.
    /// The class is relocated onto the native control on attachment.
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::new()
        }
    }

    /// Attachment lifecycle hook.
    ///
    /// Builds the underlying native control, moves the wrapper's styling
    /// class onto it, registers the widget as a text input with the page's
    /// focus state, and flushes a value buffered before attachment. Calling
    /// `attach` on an attached widget is a no-op.
    pub fn attach(&mut self) {
        if self.textarea.is_some() {
            return;
        }

        self.textarea = Some(NativeTextArea::new(self.class.take()));
        self.element = Some(focus::register_role(FocusRole::TextInput));

        // Flush exactly once; the buffered value must not survive the flush.
        if let Some(pending) = self.cached_value.take() {
            self.update_value(pending);
        }
    }

    /// Teardown lifecycle hook.
    ///
    /// Drops the native control and the focus registration. The widget holds
    /// no other resources; nothing outlives removal from the page.
    pub fn detach(&mut self) {
        if let Some(id) = self.element.take() {
            focus::unregister(id);
        }
        self.textarea = None;
        self.size = Size::ZERO;
    }

    /// Delegate focus to the underlying control. No-op while detached.
    pub fn focus(&self) {
        if let Some(id) = self.element {
            focus::focus(id);
        }
    }

    /// Check if the underlying control holds page focus.
    pub fn is_focused(&self) -> bool {
        self.element.is_some_and(focus::is_focused)
    }

    /// Whether the widget is attached to the page.
    pub fn is_attached(&self) -> bool {
        self.textarea.is_some()
    }

    /// Assign a new value.
    ///
    /// Attached: runs the measure/resize/notify cycle immediately.
    /// Detached: buffers the value (there is nothing to measure yet); a
    /// later assignment overwrites the earlier pending value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.textarea.is_some() {
            self.update_value(value);
        } else {
            self.cached_value = Some(value);
        }
    }

    /// The text currently held: the control's content when attached, the
    /// pending value otherwise.
    pub fn value(&self) -> &str {
        match &self.textarea {
            Some(textarea) => textarea.value(),
            None => self.cached_value.as_deref().unwrap_or(""),
        }
    }

    /// The widget's current dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Access the underlying native control (None while detached).
    pub fn textarea(&self) -> Option<&NativeTextArea> {
        self.textarea.as_ref()
    }

    /// Subscribe to size-change notifications dispatched on the widget.
    /// Returns an id for `remove_size_listener`.
    pub fn on_size_change<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(Size) + 'static,
    {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.size_listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a size-change subscription. Unknown ids are ignored.
    pub fn remove_size_listener(&mut self, id: SubscriptionId) {
        self.size_listeners
            .retain(|(listener_id, _)| *listener_id != id);
    }

    /// The measure/resize/notify cycle.
    fn update_value(&mut self, value: String) {
        let Some(textarea) = self.textarea.as_mut() else {
            return;
        };

        textarea.set_value(value);

        // Shrink to the probe size before reading the scroll extents. The
        // extents are clamped to the current box, so without this step a
        // previously large control would never be observed to shrink.
        textarea.resize(SIZE_PROBE, SIZE_PROBE);

        let width = textarea.scroll_width().saturating_add(SCROLL_PADDING);
        let height = textarea.scroll_height().saturating_add(SCROLL_PADDING);

        textarea.resize(width, height);
        self.size = Size::new(width, height);

        for (_, listener) in &self.size_listeners {
            listener(self.size);
        }
    }
}

impl Default for AutoSizeTextWidget {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::focus::reset_focus_state;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn setup() {
        reset_focus_state();
    }

    #[test]
    fn test_attach_then_set_value() {
        setup();

        let mut widget = AutoSizeTextWidget::new();
        widget.attach();

        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        widget.on_size_change(move |size| events_clone.borrow_mut().push(size));

        widget.set_value("hello");

        assert_eq!(widget.value(), "hello");
        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert!(events[0].width > 0);
        assert!(events[0].height > 0);
        assert_eq!(events[0], widget.size());
    }

    #[test]
    fn test_value_before_attach_is_buffered() {
        setup();

        let mut widget = AutoSizeTextWidget::new();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        widget.on_size_change(move |_| count_clone.set(count_clone.get() + 1));

        widget.set_value("x");

        // Nothing to measure yet
        assert_eq!(count.get(), 0);
        assert_eq!(widget.size(), Size::ZERO);
        assert_eq!(widget.value(), "x");

        widget.attach();

        // Flushed exactly once, not zero, not twice
        assert_eq!(count.get(), 1);
        assert_eq!(widget.value(), "x");
        assert!(widget.size().width > 0);
        assert!(widget.size().height > 0);
    }

    #[test]
    fn test_pending_value_overwritten_before_attach() {
        setup();

        let mut widget = AutoSizeTextWidget::new();
        widget.set_value("first");
        widget.set_value("second");
        widget.attach();

        assert_eq!(widget.value(), "second");
    }

    #[test]
    fn test_shrink_after_shorter_value() {
        setup();

        let mut widget = AutoSizeTextWidget::new();
        widget.attach();

        widget.set_value("a long line of text\nsecond line\nthird line");
        let large = widget.size();

        widget.set_value("hi");
        let small = widget.size();

        assert!(small.width < large.width);
        assert!(small.height < large.height);
    }

    #[test]
    fn test_size_fits_content_with_padding() {
        setup();

        let mut widget = AutoSizeTextWidget::new();
        widget.attach();
        widget.set_value("hello");

        // 5 cells wide, 1 line tall, plus padding per axis
        assert_eq!(widget.size(), Size::new(5 + SCROLL_PADDING, 1 + SCROLL_PADDING));
        let textarea = widget.textarea().unwrap();
        assert_eq!(textarea.box_size(), widget.size());
    }

    #[test]
    fn test_class_relocated_on_attach() {
        setup();

        let mut widget = AutoSizeTextWidget::with_class("note-style");
        widget.attach();

        let textarea = widget.textarea().unwrap();
        assert_eq!(textarea.class(), Some("note-style"));
        // The wrapper no longer carries the class
        assert!(widget.class.is_none());
    }

    #[test]
    fn test_attach_is_idempotent() {
        setup();

        let mut widget = AutoSizeTextWidget::new();
        widget.attach();
        widget.set_value("keep me");
        widget.attach();

        assert_eq!(widget.value(), "keep me");
    }

    #[test]
    fn test_focus_noop_while_detached() {
        setup();

        let widget = AutoSizeTextWidget::new();
        widget.focus();
        assert!(!widget.is_focused());
        assert_eq!(focus::focused(), None);
    }

    #[test]
    fn test_focus_delegates_when_attached() {
        setup();

        let mut widget = AutoSizeTextWidget::new();
        widget.attach();
        widget.focus();

        assert!(widget.is_focused());
        assert_eq!(focus::focus_context(), FocusRole::TextInput);
    }

    #[test]
    fn test_detach_clears_focus_registration() {
        setup();

        let mut widget = AutoSizeTextWidget::new();
        widget.attach();
        widget.focus();
        widget.detach();

        assert!(!widget.is_attached());
        assert!(!widget.is_focused());
        assert_eq!(focus::focused(), None);
        assert_eq!(widget.size(), Size::ZERO);
    }

    #[test]
    fn test_removed_listener_not_notified() {
        setup();

        let mut widget = AutoSizeTextWidget::new();
        widget.attach();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let id = widget.on_size_change(move |_| count_clone.set(count_clone.get() + 1));

        widget.set_value("a");
        assert_eq!(count.get(), 1);

        widget.remove_size_listener(id);
        widget.set_value("b");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_native_extents_clamped_to_box() {
        setup();

        // Platform semantics the probe-reset step exists for: once the box
        // is large, extents never report smaller content on their own.
        let mut textarea = NativeTextArea::new(None);
        textarea.set_value("wide enough line".to_string());
        textarea.resize(30, 10);

        textarea.set_value("hi".to_string());
        assert_eq!(textarea.scroll_width(), 30);
        assert_eq!(textarea.scroll_height(), 10);

        textarea.resize(1, 1);
        assert_eq!(textarea.scroll_width(), 2);
        assert_eq!(textarea.scroll_height(), 1);
    }

    #[test]
    fn test_empty_value_measures_padding_only() {
        setup();

        let mut widget = AutoSizeTextWidget::new();
        widget.attach();
        widget.set_value("");

        // Probe box still counts toward the extent
        assert_eq!(
            widget.size(),
            Size::new(SIZE_PROBE + SCROLL_PADDING, SIZE_PROBE + SCROLL_PADDING)
        );
    }
}
