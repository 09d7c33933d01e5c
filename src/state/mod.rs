//! State - page-level input, focus, and shortcut routing.

pub mod focus;
pub mod input;
pub mod keyboard;
pub mod shortcuts;

pub use focus::{ElementId, FocusRole};
pub use keyboard::{KeyHandler, KeyState, KeyboardEvent, Modifiers};
pub use shortcuts::{ShortcutRouter, ShortcutSink, format_shortcut, new_sink};
