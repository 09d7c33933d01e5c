//! Focus System - Active-element tracking and role classification
//!
//! Tracks which page element currently holds focus, and classifies it for
//! the shortcut router: a keypress landing in a text input must never be
//! treated as an editor shortcut.
//!
//! This module is the single seam between the router and the host's focus
//! primitive. Tests can register a text-input element and focus it without
//! constructing a real widget.
//!
//! # Example
//!
//! ```ignore
//! use scrawl_shell::state::focus::{self, FocusRole};
//!
//! let field = focus::register_role(FocusRole::TextInput);
//! focus::focus(field);
//! assert_eq!(focus::focus_context(), FocusRole::TextInput);
//!
//! focus::blur();
//! assert_eq!(focus::focus_context(), FocusRole::Plain);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

// =============================================================================
// TYPES
// =============================================================================

/// Identifier of an element registered on the page.
pub type ElementId = usize;

/// Classification of the focused element, as seen by the shortcut router.
///
/// Freeform text entry counts as `TextInput`; everything else on the page,
/// including no focused element at all, counts as `Plain`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusRole {
    #[default]
    Plain,
    TextInput,
}

// =============================================================================
// STATE
// =============================================================================

struct RoleRegistry {
    roles: HashMap<ElementId, FocusRole>,
    next_id: ElementId,
}

impl RoleRegistry {
    fn new() -> Self {
        Self {
            roles: HashMap::new(),
            next_id: 0,
        }
    }
}

thread_local! {
    static FOCUSED: Cell<Option<ElementId>> = const { Cell::new(None) };
    static REGISTRY: RefCell<RoleRegistry> = RefCell::new(RoleRegistry::new());
}

// =============================================================================
// ELEMENT REGISTRY
// =============================================================================

/// Register an element with the given focus role.
/// Returns the element's id. Widgets call this when they attach.
pub fn register_role(role: FocusRole) -> ElementId {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.roles.insert(id, role);
        id
    })
}

/// Remove an element from the registry. If it held focus, focus is cleared.
pub fn unregister(id: ElementId) {
    REGISTRY.with(|reg| {
        reg.borrow_mut().roles.remove(&id);
    });
    FOCUSED.with(|f| {
        if f.get() == Some(id) {
            f.set(None);
        }
    });
}

// =============================================================================
// FOCUS TRACKING
// =============================================================================

/// Move focus to the given element.
/// Focusing an unregistered id is ignored.
pub fn focus(id: ElementId) {
    let known = REGISTRY.with(|reg| reg.borrow().roles.contains_key(&id));
    if known {
        FOCUSED.with(|f| f.set(Some(id)));
    }
}

/// Clear focus (no element focused).
pub fn blur() {
    FOCUSED.with(|f| f.set(None));
}

/// The currently focused element, if any.
pub fn focused() -> Option<ElementId> {
    FOCUSED.with(|f| f.get())
}

/// Check if the given element holds focus.
pub fn is_focused(id: ElementId) -> bool {
    focused() == Some(id)
}

/// Classify the currently focused element.
///
/// `Plain` when nothing is focused or the focused element carries no
/// text-input role. Computed on demand at keypress time; never stored.
pub fn focus_context() -> FocusRole {
    let Some(id) = focused() else {
        return FocusRole::Plain;
    };
    REGISTRY.with(|reg| {
        reg.borrow()
            .roles
            .get(&id)
            .copied()
            .unwrap_or(FocusRole::Plain)
    })
}

/// Reset focus state (for testing)
pub fn reset_focus_state() {
    FOCUSED.with(|f| f.set(None));
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.roles.clear();
        reg.next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================
