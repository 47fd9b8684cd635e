use std::sync::Arc;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::notification::{Notification, NotificationId, Text};
use crate::store::NotificationStore;
use crate::types::{NotificationKind, Position};

use super::ListOptions;

/// What a notification looks like once its lazy fields are resolved.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RenderedNotification {
    pub id: String,
    pub kind: NotificationKind,
    pub class: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub position: Option<Position>,
    pub closeable: bool,
    /// Label of the OK button, present only when an OK action exists.
    pub ok: Option<String>,
    pub cancel: Option<String>,
}

/// One mounted notification.
///
/// Owns the expiry timer for its notification: the timer is started on the
/// first [`render`](Self::render) that sees a duration and never again for
/// this instance, however often it is re-rendered.
pub struct NotificationView {
    store: NotificationStore,
    notification: Arc<Notification>,
    class: String,
    ok_text: String,
    cancel_text: String,
    running_timeout: Option<JoinHandle<()>>,
}

impl NotificationView {
    #[must_use]
    pub fn mount(
        store: NotificationStore,
        notification: Arc<Notification>,
        options: &ListOptions,
    ) -> Self {
        Self {
            store,
            notification,
            class: options.class.clone(),
            ok_text: options.ok_text.clone(),
            cancel_text: options.cancel_text.clone(),
            running_timeout: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.notification.id()
    }

    #[must_use]
    pub fn notification(&self) -> &Arc<Notification> {
        &self.notification
    }

    #[must_use]
    pub const fn has_timer(&self) -> bool {
        self.running_timeout.is_some()
    }

    pub fn render(&mut self) -> RenderedNotification {
        self.schedule_expiry();

        let note = &self.notification;
        let ok = note
            .ok()
            .map(|_| note.ok_text().unwrap_or(&self.ok_text).to_string());
        let cancel = note
            .cancel()
            .map(|_| note.cancel_text().unwrap_or(&self.cancel_text).to_string());

        RenderedNotification {
            id: note.id().to_string(),
            kind: note.kind(),
            class: self.class.clone(),
            title: note.title().map(Text::resolve).map(str::to_string),
            content: note.content().map(Text::resolve).map(str::to_string),
            position: note.position(),
            closeable: note.is_closeable(),
            ok,
            cancel,
        }
    }

    /// Click on the body. Dismisses closeable notifications only.
    pub fn click(&self) -> bool {
        if !self.notification.is_closeable() {
            trace!(id = %self.id(), "click ignored on non-closeable notification");
            return false;
        }
        self.store.remove(&self.id())
    }

    /// Run the OK action; a `true` result removes the notification.
    pub fn click_ok(&self) -> bool {
        let Some(action) = self.notification.ok() else {
            return false;
        };
        if action.invoke() {
            self.store.remove(&self.id())
        } else {
            debug!(id = %self.id(), "ok action declined");
            false
        }
    }

    /// Run the Cancel action; a `true` result removes the notification.
    pub fn click_cancel(&self) -> bool {
        let Some(action) = self.notification.cancel() else {
            return false;
        };
        if action.invoke() {
            self.store.remove(&self.id())
        } else {
            debug!(id = %self.id(), "cancel action declined");
            false
        }
    }

    /// Drop the view. A pending timer is forgotten, not aborted: if it still
    /// fires, removing an absent id is a no-op.
    pub fn unmount(mut self) {
        if self.running_timeout.take().is_some() {
            trace!(id = %self.id(), "forgetting expiry timer on unmount");
        }
    }

    fn schedule_expiry(&mut self) {
        if self.running_timeout.is_some() {
            return;
        }
        let Some(duration) = self.notification.duration() else {
            return;
        };
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                warn!(id = %self.id(), error = %err, "no runtime; expiry timer not scheduled");
                return;
            }
        };

        let store = self.store.clone();
        let id = self.id();
        debug!(%id, ?duration, "expiry timer scheduled");
        self.running_timeout = Some(handle.spawn(async move {
            tokio::time::sleep(duration).await;
            if store.remove(&id) {
                debug!(%id, "notification expired");
            }
        }));
    }
}
