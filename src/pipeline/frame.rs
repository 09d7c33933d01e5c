//! Frame Scheduling - one-shot deferred callbacks.
//!
//! A callback posted with `schedule_frame` runs on the next drain of the
//! frame queue, after the host has had a chance to settle layout. Each
//! callback fires exactly once; there is no recurring loop and no
//! cancellation.

use std::cell::RefCell;

type FrameCallback = Box<dyn FnOnce()>;

thread_local! {
    static QUEUE: RefCell<Vec<FrameCallback>> = const { RefCell::new(Vec::new()) };
}

/// Post a callback for the next frame.
pub fn schedule_frame<F>(callback: F)
where
    F: FnOnce() + 'static,
{
    QUEUE.with(|q| q.borrow_mut().push(Box::new(callback)));
}

/// Drain and run all pending frame callbacks.
///
/// Callbacks scheduled while draining are deferred to the next drain, so a
/// callback can never starve the caller by rescheduling itself.
/// Returns the number of callbacks that ran.
pub fn run_frame_callbacks() -> usize {
    let pending: Vec<FrameCallback> = QUEUE.with(|q| q.borrow_mut().drain(..).collect());
    let count = pending.len();
    for callback in pending {
        callback();
    }
    count
}

/// Number of callbacks waiting for the next frame.
pub fn pending_frames() -> usize {
    QUEUE.with(|q| q.borrow().len())
}

/// Reset frame state (for testing)
pub fn reset_frame_state() {
    QUEUE.with(|q| q.borrow_mut().clear());
}
