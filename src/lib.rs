//! # scrawl-shell
//!
//! Embedding shell for the Scrawl visual editor.
//!
//! The editor application itself is an opaque collaborator: it renders its
//! own views, owns its history model, and is reached only through a narrow
//! message-port boundary. This crate is the thin shell around it:
//!
//! - routes global keyboard shortcuts to the editor's inbound port, while
//!   never stealing keys from a focused text input
//! - supplies the one custom widget the editor's views cannot express
//!   natively: an auto-growing monospace text box
//! - owns the mount lifecycle, deferring editor initialization by one frame
//!   so mount flags carry settled host geometry
//!
//! ## Architecture
//!
//! Everything runs single-threaded on the host's event loop. Page state
//! (listeners, focus, pending frames) lives in thread-local registries;
//! acquire/release pairs are explicit handles, never ambient singletons.
//!
//! ```text
//! host key event → keyboard registry → ShortcutRouter → editor port
//! editor markup → AutoSizeTextWidget → measure/resize → size-change event
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rect, Size)
//! - [`state`] - Keyboard listeners, focus classification, shortcut routing
//! - [`layout`] - Text measurement for self-sizing widgets
//! - [`primitives`] - The auto-size textarea widget
//! - [`pipeline`] - Frame scheduling and the mount lifecycle

pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use layout::{content_size, string_width};

pub use state::{
    // Focus
    ElementId, FocusRole,
    // Keyboard
    KeyHandler, KeyState, KeyboardEvent, Modifiers,
    // Shortcuts
    ShortcutRouter, ShortcutSink, format_shortcut, new_sink,
};

pub use primitives::{AutoSizeTextWidget, NativeTextArea, SubscriptionId, WIDGET_TAG};

pub use pipeline::{
    EditorApp, EmbedFlags, MAX_HISTORY_SIZE, MountPoint, Shell, ShellState, pending_frames,
    run_frame_callbacks, schedule_frame,
};
