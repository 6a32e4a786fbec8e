//! Typed playback notifications
//!
//! Listeners are called synchronously, in registration order, when the
//! animator emits an event. Nothing is queued: an event emitted while no
//! listener is registered is simply dropped.

use std::fmt;

/// Playback lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    /// A looping traversal wrapped past its end `laps` times in one tick
    Looped { laps: u32 },
    /// A non-looping traversal reached its end
    Completed,
}

/// Handle for removing a listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&PathEvent)>;

/// Ordered listener registry.
#[derive(Default)]
pub struct PathListeners {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl PathListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event.
    pub fn subscribe(&mut self, listener: impl FnMut(&PathEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Register a listener for events matching `filter` only.
    pub fn subscribe_filtered(
        &mut self,
        filter: fn(&PathEvent) -> bool,
        mut listener: impl FnMut(&PathEvent) + 'static,
    ) -> ListenerId {
        self.subscribe(move |event| {
            if filter(event) {
                listener(event);
            }
        })
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn emit(&mut self, event: PathEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for PathListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
