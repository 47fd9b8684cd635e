#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod notification;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod ui;

pub use notification::{Action, Notification, NotificationId, Payload, Text};
pub use store::{Defaults, NotificationSet, NotificationStore};
pub use types::{NotificationKind, Position};

pub type Result<T> = std::result::Result<T, error::Error>;
