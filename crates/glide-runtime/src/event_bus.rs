//! Event bus for broadcasting runtime events

/// A simple event queue that systems push to and consumers drain
#[derive(Debug)]
pub struct EventBus<E> {
    events: Vec<E>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: E) {
        self.events.push(event);
    }

    /// Drain all events from the bus in the order they were pushed
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<E> Extend<E> for EventBus<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestEvent {
        Started(u32),
        Finished(u32),
    }

    #[test]
    fn test_push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(TestEvent::Started(1));
        bus.push(TestEvent::Finished(1));

        assert_eq!(bus.len(), 2);
        assert!(!bus.is_empty());

        let events = bus.drain();
        assert_eq!(events, vec![TestEvent::Started(1), TestEvent::Finished(1)]);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_drain_clears() {
        let mut bus = EventBus::new();
        bus.push(TestEvent::Started(7));

        let _ = bus.drain();
        let events = bus.drain();
        assert!(events.is_empty());
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut bus = EventBus::new();
        bus.push(TestEvent::Started(1));
        bus.extend([TestEvent::Started(2), TestEvent::Finished(2)]);
        assert_eq!(
            bus.drain(),
            vec![
                TestEvent::Started(1),
                TestEvent::Started(2),
                TestEvent::Finished(2)
            ]
        );
    }
}
