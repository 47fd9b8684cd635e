//! The notification record and the caller-facing payload it is built from.
//!
//! A [`Payload`] is what callers hand to the store; every field is optional.
//! The store normalizes it into an immutable [`Notification`] with a fresh
//! [`NotificationId`], the kind taken from the calling method unless the
//! payload overrides it, and defaults applied for duration, position and
//! closeability.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use uuid::Uuid;

use crate::store::Defaults;
use crate::types::{NotificationKind, Position};

/// Opaque identifier assigned at insertion; also the removal token.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NotificationId(Uuid);

impl NotificationId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for NotificationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|err| format!("invalid notification id {s:?}: {err}"))
    }
}

type ProduceFn = dyn Fn() -> String + Send + Sync;

/// Title or content: either a literal string or a producer evaluated on first
/// render and memoized.
#[derive(Clone)]
pub enum Text {
    Literal(String),
    Producer {
        produce: Arc<ProduceFn>,
        cached: Arc<OnceLock<String>>,
    },
}

impl Text {
    pub fn producer<F>(produce: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Producer {
            produce: Arc::new(produce),
            cached: Arc::new(OnceLock::new()),
        }
    }

    /// Resolve the text. A producer runs at most once; clones share the cache.
    #[must_use]
    pub fn resolve(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Producer { produce, cached } => cached.get_or_init(|| produce()),
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Literal(_) => true,
            Self::Producer { cached, .. } => cached.get().is_some(),
        }
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Producer { cached, .. } => f
                .debug_struct("Producer")
                .field("cached", &cached.get())
                .finish_non_exhaustive(),
        }
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

/// OK/Cancel callback. A `true` return resolves (removes) the notification.
#[derive(Clone)]
pub struct Action(Arc<dyn Fn() -> bool + Send + Sync>);

impl Action {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    #[must_use]
    pub fn invoke(&self) -> bool {
        (self.0)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

/// Caller input for a new notification. Unset fields fall back to defaults.
#[derive(Clone, Debug, Default)]
pub struct Payload {
    kind: Option<NotificationKind>,
    title: Option<Text>,
    content: Option<Text>,
    duration: Option<Duration>,
    position: Option<Position>,
    closeable: Option<bool>,
    ok: Option<Action>,
    cancel: Option<Action>,
    ok_text: Option<String>,
    cancel_text: Option<String>,
}

impl Payload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the kind implied by the calling method.
    #[must_use]
    pub fn kind(mut self, kind: NotificationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<Text>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<Text>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Duration in seconds. Negative or non-finite values leave it unset.
    #[must_use]
    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration = Duration::try_from_secs_f64(secs).ok();
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn closeable(mut self, closeable: bool) -> Self {
        self.closeable = Some(closeable);
        self
    }

    #[must_use]
    pub fn ok<F>(mut self, callback: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.ok = Some(Action::new(callback));
        self
    }

    #[must_use]
    pub fn cancel<F>(mut self, callback: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.cancel = Some(Action::new(callback));
        self
    }

    #[must_use]
    pub fn ok_text(mut self, label: impl Into<String>) -> Self {
        self.ok_text = Some(label.into());
        self
    }

    #[must_use]
    pub fn cancel_text(mut self, label: impl Into<String>) -> Self {
        self.cancel_text = Some(label.into());
        self
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::new().content(value)
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::new().content(value)
    }
}

impl From<Text> for Payload {
    fn from(value: Text) -> Self {
        Self::new().content(value)
    }
}

/// A normalized, visible notification. Immutable once inserted.
#[derive(Clone, Debug)]
pub struct Notification {
    id: NotificationId,
    kind: NotificationKind,
    title: Option<Text>,
    content: Option<Text>,
    duration: Option<Duration>,
    position: Option<Position>,
    closeable: bool,
    ok: Option<Action>,
    cancel: Option<Action>,
    ok_text: Option<String>,
    cancel_text: Option<String>,
}

impl Notification {
    pub(crate) fn normalize(kind: NotificationKind, payload: Payload, defaults: &Defaults) -> Self {
        let Payload {
            kind: explicit_kind,
            title,
            content,
            duration,
            position,
            closeable,
            ok,
            cancel,
            ok_text,
            cancel_text,
        } = payload;

        // Action-confirmation toasts must not vanish on a stray click.
        let closeable = closeable.unwrap_or(ok.is_none() && cancel.is_none());

        Self {
            id: NotificationId::generate(),
            kind: explicit_kind.unwrap_or(kind),
            title,
            content,
            duration: duration.filter(|d| !d.is_zero()).or(defaults.duration),
            position: position.or(defaults.position),
            closeable,
            ok,
            cancel,
            ok_text,
            cancel_text,
        }
    }

    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    #[must_use]
    pub const fn title(&self) -> Option<&Text> {
        self.title.as_ref()
    }

    #[must_use]
    pub const fn content(&self) -> Option<&Text> {
        self.content.as_ref()
    }

    #[must_use]
    pub const fn duration(&self) -> Option<Duration> {
        self.duration
    }

    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    #[must_use]
    pub const fn is_closeable(&self) -> bool {
        self.closeable
    }

    #[must_use]
    pub const fn ok(&self) -> Option<&Action> {
        self.ok.as_ref()
    }

    #[must_use]
    pub const fn cancel(&self) -> Option<&Action> {
        self.cancel.as_ref()
    }

    #[must_use]
    pub fn ok_text(&self) -> Option<&str> {
        self.ok_text.as_deref()
    }

    #[must_use]
    pub fn cancel_text(&self) -> Option<&str> {
        self.cancel_text.as_deref()
    }
}
