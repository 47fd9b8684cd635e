use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::notification::NotificationId;
use crate::store::{NotificationSet, NotificationStore};

use super::item::{NotificationView, RenderedNotification};
use super::transition::SlideTransition;
use super::ListOptions;

/// Everything the host needs to paint the list once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListFrame {
    pub wrapper_class: String,
    pub items: Vec<RenderedNotification>,
    /// Newly mounted entries and the slide to play on them.
    pub entering: Vec<(NotificationId, SlideTransition)>,
    /// Entries gone since the previous frame; remove their element once the
    /// slide has played.
    pub leaving: Vec<(NotificationId, SlideTransition)>,
}

impl ListFrame {
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }
}

/// The mounted notification list.
///
/// Subscribes to the store on mount and keeps one [`NotificationView`] per
/// visible notification, mounting and unmounting them as the set changes.
pub struct ListView {
    store: NotificationStore,
    options: ListOptions,
    rx: watch::Receiver<Arc<NotificationSet>>,
    views: IndexMap<NotificationId, NotificationView>,
}

impl ListView {
    /// The first [`next_frame`](Self::next_frame) after mounting returns
    /// immediately with whatever the store already holds.
    #[must_use]
    pub fn mount(store: &NotificationStore, options: ListOptions) -> Self {
        debug!(reverse = options.reverse, class = %options.wrapper_class, "notification list mounted");
        let mut rx = store.subscribe();
        rx.mark_changed();
        Self {
            store: store.clone(),
            rx,
            options,
            views: IndexMap::new(),
        }
    }

    #[must_use]
    pub const fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Reconcile against the latest snapshot and render it.
    pub fn frame(&mut self) -> ListFrame {
        let set = self.rx.borrow_and_update().clone();
        let position = self.store.defaults().position;

        let gone: Vec<NotificationId> = self
            .views
            .keys()
            .filter(|id| !set.contains(id))
            .copied()
            .collect();
        let mut leaving = Vec::with_capacity(gone.len());
        for id in gone {
            if let Some(view) = self.views.shift_remove(&id) {
                view.unmount();
                leaving.push((id, SlideTransition::exit(position)));
            }
        }

        let mut entering = Vec::new();
        for note in set.iter() {
            let id = note.id();
            if !self.views.contains_key(&id) {
                let view = NotificationView::mount(self.store.clone(), Arc::clone(note), &self.options);
                self.views.insert(id, view);
                entering.push((id, SlideTransition::enter(position)));
            }
        }

        let mut items = Vec::with_capacity(set.len());
        for note in set.ordered(self.options.reverse) {
            if let Some(view) = self.views.get_mut(&note.id()) {
                items.push(view.render());
            }
        }

        trace!(
            visible = items.len(),
            entering = entering.len(),
            leaving = leaving.len(),
            "notification list rendered"
        );
        ListFrame {
            wrapper_class: self.options.wrapper_class.clone(),
            items,
            entering,
            leaving,
        }
    }

    /// Wait for the next change of the set, then render it.
    pub async fn next_frame(&mut self) -> ListFrame {
        // The sender lives as long as `self.store`, so this only returns Ok.
        if self.rx.changed().await.is_err() {
            trace!("notification store closed");
        }
        self.frame()
    }

    pub fn click(&self, id: &NotificationId) -> bool {
        self.views.get(id).is_some_and(NotificationView::click)
    }

    pub fn click_ok(&self, id: &NotificationId) -> bool {
        self.views.get(id).is_some_and(NotificationView::click_ok)
    }

    pub fn click_cancel(&self, id: &NotificationId) -> bool {
        self.views.get(id).is_some_and(NotificationView::click_cancel)
    }

    pub fn unmount(self) {
        for (_, view) in self.views {
            view.unmount();
        }
        debug!("notification list unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::ListView;
    use crate::notification::Payload;
    use crate::store::{Defaults, NotificationStore};
    use crate::types::Position;
    use crate::ui::ListOptions;
    use crate::ui::transition::SlideTransition;
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn frames_report_entering_and_leaving() {
        let store = NotificationStore::new(Defaults {
            duration: None,
            position: Some(Position::Top),
        });
        let mut list = ListView::mount(&store, ListOptions::default());
        assert!(list.frame().items.is_empty());

        let a = store.info("A");
        let frame = list.frame();
        assert_eq!(
            frame.entering,
            vec![(a, SlideTransition::enter(Some(Position::Top)))]
        );
        assert!(frame.leaving.is_empty());

        let b = store.info("B");
        store.hide(&a);
        let frame = list.frame();
        assert_eq!(frame.entering.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![b]);
        assert_eq!(
            frame.leaving,
            vec![(a, SlideTransition::exit(Some(Position::Top)))]
        );
        assert_eq!(frame.items.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn existing_notifications_render_on_first_frame_after_mount() {
        let store = NotificationStore::default();
        let id = store.success(Payload::new().content("saved").duration_secs(2.0));
        let mut list = ListView::mount(&store, ListOptions::default());

        let first = timeout(Duration::from_millis(10), list.next_frame()).await;
        let first = first.unwrap_or_else(|_| panic!("first frame must not wait for a change"));
        assert_eq!(first.entering.len(), 1);
        assert_eq!(first.entering[0].0, id);

        let expired = timeout(Duration::from_secs(10), list.next_frame()).await;
        let expired = expired.unwrap_or_else(|_| panic!("expiry timer never fired"));
        assert!(expired.items.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn clicks_are_forwarded_to_mounted_views() {
        let store = NotificationStore::default();
        let mut list = ListView::mount(&store, ListOptions::default());
        let id = store.info("tap me");
        assert!(!list.click(&id));

        let _ = list.frame();
        assert!(list.click(&id));
        assert!(!list.click(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn wrapper_class_comes_from_options() {
        let store = NotificationStore::default();
        let options = ListOptions {
            wrapper_class: "toasts".to_string(),
            ..ListOptions::default()
        };
        let mut list = ListView::mount(&store, options);
        assert_eq!(list.frame().wrapper_class, "toasts");
    }
}
