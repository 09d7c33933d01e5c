//! Mount API - Shell lifecycle and editor initialization.
//!
//! This module provides the composition root of the embedding shell: it
//! creates the shortcut router, wires the router's output to the editor's
//! inbound port, and initializes the editor with its mount-time flags.
//!
//! Initialization is deferred by one frame so the flags carry the mount
//! element's settled on-page geometry rather than a pre-layout rectangle.
//!
//! # Example
//!
//! ```ignore
//! use scrawl_shell::pipeline::mount::{MountPoint, Shell};
//! use scrawl_shell::types::Rect;
//! use std::time::Duration;
//!
//! let mount = MountPoint::new(Rect::new(0, 0, 80, 24));
//! let mut shell = Shell::new();
//! shell.render(mount);
//!
//! // Drive the shell from your event loop
//! loop {
//!     shell.tick(Duration::from_millis(16))?;
//! }
//! ```

use std::cell::{Cell, Ref, RefCell};
use std::io;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::state::shortcuts::{self, ShortcutRouter, ShortcutSink};
use crate::state::input;
use crate::types::Rect;
use super::frame;

/// Bound on the editor's undo-history depth, passed at mount time.
pub const MAX_HISTORY_SIZE: u32 = 50;

// =============================================================================
// Mount point
// =============================================================================

/// The host element the editor is mounted into.
///
/// Shared between the host page and the deferred init callback, so the
/// geometry read happens after host layout has settled.
pub struct MountPoint {
    rect: Cell<Rect>,
}

impl MountPoint {
    /// Create a mount point with its current on-page rectangle.
    pub fn new(rect: Rect) -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(rect),
        })
    }

    /// The element's current on-page rectangle.
    pub fn rect(&self) -> Rect {
        self.rect.get()
    }

    /// Update the rectangle (host layout settling).
    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }
}

// =============================================================================
// Editor application
// =============================================================================

/// Initialization flags handed to the editor at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedFlags {
    /// Seed for id allocation inside the editor, from wall-clock time.
    pub latest_id: u64,
    /// Undo-history depth bound.
    pub max_history_size: u32,
    /// Mount element geometry at deferred initialization.
    pub embed_left: u16,
    pub embed_top: u16,
    pub embed_width: u16,
    pub embed_height: u16,
}

impl EmbedFlags {
    fn at_mount(rect: Rect) -> Self {
        Self {
            latest_id: current_time_millis(),
            max_history_size: MAX_HISTORY_SIZE,
            embed_left: rect.left,
            embed_top: rect.top,
            embed_width: rect.width,
            embed_height: rect.height,
        }
    }
}

/// The mounted editor application instance.
///
/// The editor itself is an opaque collaborator; this handle is its side of
/// the narrow boundary - the mount flags and the inbound shortcut port.
pub struct EditorApp {
    flags: EmbedFlags,
    shortcuts: Receiver<String>,
}

impl EditorApp {
    /// The flags the editor was initialized with.
    pub fn flags(&self) -> &EmbedFlags {
        &self.flags
    }

    /// Take the next forwarded shortcut, if one is queued.
    /// Messages arrive in keypress order, at most one per keydown.
    pub fn try_recv_shortcut(&self) -> Option<String> {
        self.shortcuts.try_recv().ok()
    }
}

fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// =============================================================================
// Shell
// =============================================================================

/// Shell lifecycle: `Unmounted -> Mounting -> Mounted`.
/// There is no transition back; a shell is disposed, not unmounted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShellState {
    #[default]
    Unmounted,
    /// `render` was called; waiting for the deferred init frame.
    Mounting,
    Mounted,
}

/// The embedding shell: shortcut router plus the editor instance.
///
/// Constructing a shell acquires the page-level keyboard listener. Keydowns
/// arriving before the deferred mount completes are dropped by the router's
/// empty sink - an accepted race, not an error.
pub struct Shell {
    router: ShortcutRouter,
    app: Rc<RefCell<Option<EditorApp>>>,
    state: Rc<Cell<ShellState>>,
}

impl Shell {
    /// Create the shell and register the page-level keyboard listener.
    pub fn new() -> Self {
        let mut router = ShortcutRouter::new(shortcuts::new_sink());
        router.attach();

        Self {
            router,
            app: Rc::new(RefCell::new(None)),
            state: Rc::new(Cell::new(ShellState::Unmounted)),
        }
    }

    /// Mount the editor into the given element.
    ///
    /// Defers to the next frame before reading the element's geometry, then
    /// initializes the editor and opens its shortcut port. Calling `render`
    /// again after the first call is ignored.
    pub fn render(&mut self, mount: Rc<MountPoint>) {
        if self.state.get() != ShellState::Unmounted {
            return;
        }
        self.state.set(ShellState::Mounting);

        let sink = self.router_sink();
        let app = self.app.clone();
        let state = self.state.clone();

        frame::schedule_frame(move || {
            let rect = mount.rect();
            let flags = EmbedFlags::at_mount(rect);

            let (tx, rx) = mpsc::channel();
            *sink.borrow_mut() = Some(tx);
            *app.borrow_mut() = Some(EditorApp {
                flags,
                shortcuts: rx,
            });
            state.set(ShellState::Mounted);
        });
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ShellState {
        self.state.get()
    }

    /// Borrow the mounted editor instance (None until the init frame ran).
    pub fn app(&self) -> Ref<'_, Option<EditorApp>> {
        self.app.borrow()
    }

    /// Release the page-level keyboard listener.
    ///
    /// Must be called by any host that tears the embedding down without a
    /// full page reload. Calling `shutdown` twice is a no-op.
    pub fn shutdown(&mut self) {
        self.router.detach();
    }

    /// Run one step of the host event loop: drain pending frame callbacks
    /// (including the deferred editor init), then poll and route one host
    /// input event.
    pub fn tick(&self, timeout: Duration) -> io::Result<()> {
        frame::run_frame_callbacks();
        if let Some(event) = input::poll_event(timeout)? {
            input::route_event(event);
        }
        Ok(())
    }

    fn router_sink(&self) -> ShortcutSink {
        self.router.sink()
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
