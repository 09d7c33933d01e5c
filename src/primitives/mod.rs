//! Primitives - custom widgets supplied to the embedded editor.

pub mod textarea;

pub use textarea::{AutoSizeTextWidget, NativeTextArea, SubscriptionId, WIDGET_TAG};
