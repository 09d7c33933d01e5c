//! Pipeline - frame scheduling and the mount lifecycle.

pub mod frame;
pub mod mount;

pub use frame::{pending_frames, run_frame_callbacks, schedule_frame};
pub use mount::{EditorApp, EmbedFlags, MAX_HISTORY_SIZE, MountPoint, Shell, ShellState};
