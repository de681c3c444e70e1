use super::{Event, EventConsumer};
use crossbeam::deque::{Injector, Worker};
use std::sync::Arc;

/// A multi-producer queue of validation events. Workers send into it from any thread; a
/// reporter reads it through an `EventConsumer`.
///
#[derive(Clone, Debug, Default)]
pub struct EventChannel {
    bus: Arc<Injector<Event>>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bus.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bus.len()
    }

    pub fn send<E>(&self, event: E)
    where
        E: Into<Event>,
    {
        self.bus.push(event.into())
    }

    pub fn consumer(&self) -> EventConsumer {
        EventConsumer::new(self.bus.clone(), Worker::new_fifo())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ResourceEvent, WorkflowEvent};

    #[test]
    fn a_new_channel_and_its_consumer_are_empty() {
        let channel = EventChannel::new();
        assert!(channel.is_empty());
        assert!(channel.consumer().is_empty());
    }

    #[quickcheck]
    fn sent_events_wait_until_fetched(event: Event) {
        let channel = EventChannel::new();
        let consumer = channel.consumer();
        channel.send(event.clone());
        assert_eq!(channel.len(), 1);
        assert!(consumer.pop().is_none());
        consumer.fetch();
        assert_matches!(consumer.pop(), Some(e) if e == event);
        assert!(consumer.pop().is_none());
    }

    #[quickcheck]
    fn events_arrive_in_the_order_they_are_sent(events: Vec<Event>) {
        let channel = EventChannel::new();
        let consumer = channel.consumer();
        for event in &events {
            channel.send(event.clone());
        }
        assert_eq!(consumer.drain(), events);
        assert!(channel.is_empty());
    }

    #[test]
    fn events_sent_from_many_threads_all_arrive() {
        let channel = EventChannel::new();
        let consumer = channel.consumer();

        crossbeam::thread::scope(|scope| {
            for worker in 0..4 {
                let channel = &channel;
                scope.spawn(move |_| {
                    for n in 0..25 {
                        channel.send(ResourceEvent::ResourcePassed {
                            logical_id: format!("R{}x{}", worker, n),
                        });
                    }
                });
            }
        })
        .unwrap();
        channel.send(WorkflowEvent::ValidationCompleted {
            passed: 100,
            failed: 0,
            skipped: 0,
        });

        let events = consumer.drain();
        assert_eq!(events.len(), 101);
        assert!(events.last().map(Event::is_completion).unwrap_or(false));
    }
}
