//! The notification store.
//!
//! The visible set lives in a `watch` channel as an `Arc<NotificationSet>`.
//! Every mutation builds a new set and publishes it under the channel's write
//! lock, so readers only ever see whole snapshots and concurrent writers are
//! serialized. Removals that find nothing to remove publish nothing.

use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::notification::{Notification, NotificationId, Payload};
use crate::types::{NotificationKind, Position};

/// Process-wide fallbacks applied at insertion time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Defaults {
    /// `None` keeps notifications until they are dismissed.
    pub duration: Option<Duration>,
    /// `None` leaves placement to the rendering layer.
    pub position: Option<Position>,
}

/// Visible notifications keyed by id, iterated in insertion order.
#[derive(Clone, Debug, Default)]
pub struct NotificationSet {
    entries: IndexMap<NotificationId, Arc<Notification>>,
}

impl NotificationSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &NotificationId) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&Arc<Notification>> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Arc<Notification>> {
        self.entries.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = NotificationId> + '_ {
        self.entries.keys().copied()
    }

    /// Insertion order, or newest first when `reverse` is set.
    #[must_use]
    pub fn ordered(&self, reverse: bool) -> Vec<Arc<Notification>> {
        if reverse {
            self.iter().rev().cloned().collect()
        } else {
            self.iter().cloned().collect()
        }
    }

    fn with(&self, notification: Arc<Notification>) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(notification.id(), notification);
        Self { entries }
    }

    fn without(&self, id: &NotificationId) -> Option<Self> {
        if !self.entries.contains_key(id) {
            return None;
        }
        let mut entries = self.entries.clone();
        entries.shift_remove(id);
        Some(Self { entries })
    }

    fn without_closeable(&self) -> Option<Self> {
        let entries: IndexMap<_, _> = self
            .entries
            .iter()
            .filter(|(_, note)| !note.is_closeable())
            .map(|(id, note)| (*id, Arc::clone(note)))
            .collect();
        (entries.len() != self.entries.len()).then_some(Self { entries })
    }
}

struct Inner {
    set: watch::Sender<Arc<NotificationSet>>,
    defaults: watch::Sender<Defaults>,
}

/// Shared handle to the visible notifications. Clones refer to the same store.
#[derive(Clone)]
pub struct NotificationStore {
    inner: Arc<Inner>,
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(Defaults::default())
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore")
            .field("len", &self.inner.set.borrow().len())
            .field("defaults", &*self.inner.defaults.borrow())
            .finish()
    }
}

impl NotificationStore {
    #[must_use]
    pub fn new(defaults: Defaults) -> Self {
        let (set, _) = watch::channel(Arc::new(NotificationSet::default()));
        let (defaults, _) = watch::channel(defaults);
        Self {
            inner: Arc::new(Inner { set, defaults }),
        }
    }

    #[must_use]
    pub fn defaults(&self) -> Defaults {
        *self.inner.defaults.borrow()
    }

    /// Replace the fallbacks used by later insertions.
    pub fn set_defaults(&self, defaults: Defaults) {
        debug!(
            duration = ?defaults.duration,
            position = ?defaults.position,
            "notification defaults updated"
        );
        self.inner.defaults.send_replace(defaults);
    }

    /// Normalize `payload`, insert it and return its id.
    pub fn notify(&self, kind: NotificationKind, payload: impl Into<Payload>) -> NotificationId {
        let defaults = self.defaults();
        let notification = Arc::new(Notification::normalize(kind, payload.into(), &defaults));
        let id = notification.id();
        debug!(
            %id,
            kind = %notification.kind(),
            closeable = notification.is_closeable(),
            duration = ?notification.duration(),
            "notification added"
        );
        self.inner.set.send_modify(|set| {
            *set = Arc::new(set.with(notification));
        });
        id
    }

    pub fn info(&self, payload: impl Into<Payload>) -> NotificationId {
        self.notify(NotificationKind::Info, payload)
    }

    pub fn warning(&self, payload: impl Into<Payload>) -> NotificationId {
        self.notify(NotificationKind::Warning, payload)
    }

    pub fn success(&self, payload: impl Into<Payload>) -> NotificationId {
        self.notify(NotificationKind::Success, payload)
    }

    pub fn error(&self, payload: impl Into<Payload>) -> NotificationId {
        self.notify(NotificationKind::Error, payload)
    }

    /// Remove `id`. Returns whether it was present; absent ids are a no-op.
    pub fn remove(&self, id: &NotificationId) -> bool {
        let removed = self.inner.set.send_if_modified(|set| match set.without(id) {
            Some(next) => {
                *set = Arc::new(next);
                true
            }
            None => false,
        });
        if removed {
            debug!(%id, "notification removed");
        } else {
            trace!(%id, "notification already gone");
        }
        removed
    }

    /// Alias of [`Self::remove`] matching the public `hide` call.
    pub fn hide(&self, id: &NotificationId) -> bool {
        self.remove(id)
    }

    /// Remove every closeable notification and return how many went away.
    pub fn hide_all(&self) -> usize {
        let mut removed = 0;
        self.inner.set.send_if_modified(|set| {
            let before = set.len();
            match set.without_closeable() {
                Some(next) => {
                    removed = before - next.len();
                    *set = Arc::new(next);
                    true
                }
                None => false,
            }
        });
        debug!(removed, "closeable notifications hidden");
        removed
    }

    /// Current snapshot, without subscribing to later changes.
    #[must_use]
    pub fn snapshot(&self) -> Arc<NotificationSet> {
        self.inner.set.borrow().clone()
    }

    /// Receiver woken on every published change. The current snapshot is
    /// marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<NotificationSet>> {
        self.inner.set.subscribe()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.set.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.set.borrow().is_empty()
    }
}
