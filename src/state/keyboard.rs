//! Keyboard Module - Page-level keyboard event state and listener registry
//!
//! State and listener registry for keyboard events on the host page.
//! Does NOT own the input source (that is the input module).
//! Does NOT decide shortcut forwarding (that is the shortcuts module).
//!
//! # API
//!
//! - `last_event` - Get last keyboard event
//! - `last_key` - Get last key pressed
//! - `on(handler)` - Subscribe to all keyboard events
//! - `dispatch(event)` - Route an event through the registered listeners
//!
//! # Example
//!
//! ```ignore
//! use scrawl_shell::state::keyboard;
//!
//! // Subscribe to all keyboard events
//! let cleanup = keyboard::on(|event| {
//!     println!("Key: {}", event.key);
//!     false // Don't consume
//! });
//!
//! // Later: release the listener
//! cleanup();
//! ```

use std::cell::RefCell;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a keydown (press or auto-repeat).
    pub fn is_keydown(&self) -> bool {
        self.state != KeyState::Release
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: RefCell<Option<KeyboardEvent>> = const { RefCell::new(None) };
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.borrow().clone())
}

/// Get the last key pressed
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

// Handlers are identified by id so a cleanup closure can remove exactly
// the listener it registered, regardless of registration order.

struct ListenerRegistry {
    handlers: Vec<(usize, KeyHandler)>,
    next_id: usize,
}

impl ListenerRegistry {
    fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<ListenerRegistry> = RefCell::new(ListenerRegistry::new());
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a keyboard event to all registered listeners.
/// Returns true if any listener consumed the event.
///
/// Press and auto-repeat events both reach listeners - every keydown on the
/// page is routed exactly once. Release events only update `last_event`.
pub fn dispatch(event: KeyboardEvent) -> bool {
    LAST_EVENT.with(|s| *s.borrow_mut() = Some(event.clone()));

    if !event.is_keydown() {
        return false;
    }

    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        for (_, handler) in &reg.handlers {
            if handler(&event) {
                return true;
            }
        }
        false
    })
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to all keyboard events on the page.
/// Return true from the handler to consume the event.
/// Returns a cleanup function that releases the listener.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Number of listeners currently registered on the page.
pub fn listener_count() -> usize {
    REGISTRY.with(|reg| reg.borrow().handlers.len())
}

/// Clear all state and listeners.
pub fn cleanup() {
    REGISTRY.with(|reg| {
        reg.borrow_mut().handlers.clear();
    });
    LAST_EVENT.with(|s| *s.borrow_mut() = None);
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    cleanup();
    REGISTRY.with(|reg| {
        reg.borrow_mut().next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_keyboard_state();
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert!(last_event().is_none());
        assert_eq!(last_key(), "");
        assert_eq!(listener_count(), 0);
    }

    #[test]
    fn test_dispatch_updates_state() {
        setup();

        dispatch(KeyboardEvent::new("a"));
        assert_eq!(last_key(), "a");

        dispatch(KeyboardEvent::new("Enter"));
        assert_eq!(last_key(), "Enter");
    }

    #[test]
    fn test_listener_receives_events() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = on(move |_event| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        dispatch(KeyboardEvent::new("a"));
        assert_eq!(count.get(), 1);

        dispatch(KeyboardEvent::new("b"));
        assert_eq!(count.get(), 2);

        cleanup();

        dispatch(KeyboardEvent::new("c"));
        assert_eq!(count.get(), 2); // No more increments
    }

    #[test]
    fn test_consumption_stops_propagation() {
        setup();

        let _c1 = on(|event| event.key == "Enter");

        let reached = Rc::new(Cell::new(false));
        let reached_clone = reached.clone();
        let _c2 = on(move |_| {
            reached_clone.set(true);
            false
        });

        let result = dispatch(KeyboardEvent::new("Enter"));
        assert!(result);
        assert!(!reached.get()); // Second listener not reached

        let result = dispatch(KeyboardEvent::new("a"));
        assert!(!result);
        assert!(reached.get());
    }

    #[test]
    fn test_repeat_reaches_listeners() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let _cleanup = on(move |_| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        dispatch(KeyboardEvent {
            key: "a".to_string(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        });
        assert_eq!(count.get(), 1);

        // Auto-repeat is another keydown - routed as well
        dispatch(KeyboardEvent {
            key: "a".to_string(),
            modifiers: Modifiers::default(),
            state: KeyState::Repeat,
        });
        assert_eq!(count.get(), 2);

        // Release only updates state
        dispatch(KeyboardEvent {
            key: "a".to_string(),
            modifiers: Modifiers::default(),
            state: KeyState::Release,
        });
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_cleanup_is_order_independent() {
        setup();

        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let first_clone = first.clone();
        let cleanup_first = on(move |_| {
            first_clone.set(first_clone.get() + 1);
            false
        });

        let second_clone = second.clone();
        let _cleanup_second = on(move |_| {
            second_clone.set(second_clone.get() + 1);
            false
        });

        // Removing the first listener must not disturb the second
        cleanup_first();

        dispatch(KeyboardEvent::new("x"));
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_modifiers() {
        setup();

        let ctrl_pressed = Rc::new(Cell::new(false));
        let ctrl_clone = ctrl_pressed.clone();

        let _cleanup = on(move |event| {
            if event.modifiers.ctrl && event.key == "c" {
                ctrl_clone.set(true);
            }
            false
        });

        dispatch(KeyboardEvent::with_modifiers("c", Modifiers::ctrl()));
        assert!(ctrl_pressed.get());
    }
}
