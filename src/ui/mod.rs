//! Rendering-layer contract: a mounted list of notification views driven by
//! store snapshots.

mod item;
mod list;
pub mod transition;

pub use item::{NotificationView, RenderedNotification};
pub use list::{ListFrame, ListView};
pub use transition::SlideTransition;

pub const DEFAULT_WRAPPER_CLASS: &str = "global-notifications";
pub const DEFAULT_CLASS: &str = "global-notification";
pub const DEFAULT_OK_TEXT: &str = "OK";
pub const DEFAULT_CANCEL_TEXT: &str = "Cancel";

/// Per-list display settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListOptions {
    /// Newest first instead of insertion order.
    pub reverse: bool,
    pub wrapper_class: String,
    pub class: String,
    pub ok_text: String,
    pub cancel_text: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            reverse: false,
            wrapper_class: DEFAULT_WRAPPER_CLASS.to_string(),
            class: DEFAULT_CLASS.to_string(),
            ok_text: DEFAULT_OK_TEXT.to_string(),
            cancel_text: DEFAULT_CANCEL_TEXT.to_string(),
        }
    }
}
