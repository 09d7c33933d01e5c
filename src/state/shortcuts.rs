//! Shortcuts Module - Global shortcut routing to the embedded editor
//!
//! Decides, per keydown on the page, whether the event is a candidate
//! shortcut for the embedded editor application. Keys typed into a text
//! input are never forwarded; everything else is normalized into a
//! canonical shortcut string and sent through the application's inbound
//! port.
//!
//! The router owns the single page-level keyboard listener. `attach` and
//! `detach` form a strict acquire/release pair; a host that tears the
//! shell down without a full reload must detach, or the listener leaks.
//!
//! # Example
//!
//! ```ignore
//! use scrawl_shell::state::shortcuts::{ShortcutRouter, new_sink};
//!
//! let sink = new_sink();
//! let mut router = ShortcutRouter::new(sink.clone());
//! router.attach();
//!
//! // ... the shell fills `sink` once the editor has mounted ...
//!
//! router.detach();
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use super::focus::{self, FocusRole};
use super::keyboard::{self, KeyboardEvent};

// =============================================================================
// TYPES
// =============================================================================

/// Slot holding the mounted application's inbound port.
///
/// Empty until the deferred mount completes; keypresses arriving in that
/// window are dropped silently (an accepted, non-fatal race).
pub type ShortcutSink = Rc<RefCell<Option<Sender<String>>>>;

/// Create an empty sink slot.
pub fn new_sink() -> ShortcutSink {
    Rc::new(RefCell::new(None))
}

/// Routes page keydowns to the embedded editor's shortcut port.
pub struct ShortcutRouter {
    sink: ShortcutSink,
    listener: Option<Box<dyn FnOnce()>>,
}

// =============================================================================
// SHORTCUT STRING
// =============================================================================

/// Build the canonical shortcut string for a key event.
///
/// The `ctrl+` prefix is present iff the control modifier is held; no other
/// modifier is encoded. The key name itself is passed through unmodified.
pub fn format_shortcut(event: &KeyboardEvent) -> String {
    if event.modifiers.ctrl {
        format!("ctrl+{}", event.key)
    } else {
        event.key.clone()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

impl ShortcutRouter {
    /// Create a router forwarding into the given sink slot.
    /// The listener is not registered until `attach` is called.
    pub fn new(sink: ShortcutSink) -> Self {
        Self {
            sink,
            listener: None,
        }
    }

    /// Acquire the page-level keyboard listener.
    /// Calling `attach` on an already-attached router is a no-op.
    pub fn attach(&mut self) {
        if self.listener.is_some() {
            return;
        }

        let sink = self.sink.clone();
        let cleanup = keyboard::on(move |event| Self::on_key_down(&sink, event));
        self.listener = Some(Box::new(cleanup));
    }

    /// Release the page-level keyboard listener.
    /// Safe to call when never attached, and safe to call twice.
    pub fn detach(&mut self) {
        if let Some(cleanup) = self.listener.take() {
            cleanup();
        }
    }

    /// Whether the page-level listener is currently registered.
    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// The sink slot this router forwards into.
    pub fn sink(&self) -> ShortcutSink {
        self.sink.clone()
    }

    /// Handle one keydown. Exposed for testability.
    ///
    /// Suppresses the event when a text input holds focus, otherwise sends
    /// the canonical shortcut string through the sink. An empty sink (editor
    /// not yet mounted) and a closed port both drop the message silently.
    /// The event is never consumed - listeners behind the router still run.
    pub fn on_key_down(sink: &ShortcutSink, event: &KeyboardEvent) -> bool {
        if !event.is_keydown() {
            return false;
        }

        // A widget mid-typing must never trigger editor shortcuts.
        if focus::focus_context() == FocusRole::TextInput {
            return false;
        }

        if let Some(port) = sink.borrow().as_ref() {
            // Fire-and-forget: a dropped receiver is not an error here.
            let _ = port.send(format_shortcut(event));
        }

        false
    }
}

impl Drop for ShortcutRouter {
    fn drop(&mut self) {
        self.detach();
    }
}

// =============================================================================
// TESTS
// =============================================================================
