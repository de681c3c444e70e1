use super::Event;
use crossbeam::deque::{Injector, Steal, Worker};
use std::sync::Arc;

/// The reading end of an `EventChannel`.
///
/// Events move from the shared channel into a local queue in batches: `fetch` moves a batch,
/// `pop` reads the local queue only.
///
pub struct EventConsumer {
    channel: Arc<Injector<Event>>,
    queue: Worker<Event>,
}

impl EventConsumer {
    pub fn new(channel: Arc<Injector<Event>>, queue: Worker<Event>) -> Self {
        Self { channel, queue }
    }

    pub fn fetch(&self) {
        while let Steal::Retry = self.channel.steal_batch(&self.queue) {}
    }

    pub fn pop(&self) -> Option<Event> {
        self.queue.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.fetch();
        self.queue.is_empty()
    }

    /// Everything sent so far, in order.
    pub fn drain(&self) -> Vec<Event> {
        let mut events = vec![];
        loop {
            self.fetch();
            match self.pop() {
                Some(event) => events.push(event),
                None if self.channel.is_empty() => return events,
                None => continue,
            }
        }
    }
}
