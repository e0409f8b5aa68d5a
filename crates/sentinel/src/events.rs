//! # SENTINEL Event System
//!
//! Detections leave the engine through the flag store; this bus carries
//! them on to whoever else cares (UI, audio, logs).
//!
//! ```text
//! ┌──────────────┐      ┌─────────────┐      ┌─────────────┐
//! │ GameSwitches │─────>│   Event     │─────>│  Consumers  │
//! │ SentinelLoop │      │   Channel   │      │ (UI, audio) │
//! └──────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Bounded crossbeam channel; when it is full, events are dropped rather
//! than stalling the frame.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use sentinel_core::{ReactionDescriptor, TickReport};
use sentinel_shared::WatcherId;

/// Default channel capacity.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Events published by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum SentinelEvent {
    /// A watcher saw the target and one of its reactions was applied.
    ///
    /// Emitted once per reaction, in firing order.
    Spotted {
        /// Watcher that fired.
        watcher: WatcherId,
        /// Reaction that was applied.
        reaction: ReactionDescriptor,
    },

    /// A frame in which at least one watcher fired.
    FrameFired {
        /// Frame number.
        frame: u64,
        /// Tick counters for the frame.
        report: TickReport,
    },
}

/// Owner of the channel pair.
pub struct EventBus {
    sender: Sender<SentinelEvent>,
    receiver: Receiver<SentinelEvent>,
}

impl EventBus {
    /// Creates a bus that holds at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a connected sender and receiver.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Handle for sending events.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: Sender<SentinelEvent>,
}

impl EventSender {
    /// Sends without blocking. Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: SentinelEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Sentinel event channel full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone, Debug)]
pub struct EventReceiver {
    receiver: Receiver<SentinelEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    #[inline]
    pub fn drain(&self) -> Vec<SentinelEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one pending event.
    #[inline]
    pub fn try_recv(&self) -> Option<SentinelEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// True if an event is waiting.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_shared::StateKey;

    fn spotted(id: u32) -> SentinelEvent {
        SentinelEvent::Spotted {
            watcher: WatcherId::new(id),
            reaction: ReactionDescriptor::LocalFlag { flag: StateKey::name("A") },
        }
    }

    #[test]
    fn test_send_and_drain_in_order() {
        let (tx, rx) = EventBus::create_pair(8);
        assert!(tx.send(spotted(1)));
        assert!(tx.send(spotted(2)));
        assert_eq!(rx.pending_count(), 2);

        assert_eq!(rx.drain(), vec![spotted(1), spotted(2)]);
        assert!(!rx.has_events());
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn test_full_channel_drops() {
        let (tx, rx) = EventBus::create_pair(1);
        assert!(tx.send(spotted(1)));
        assert!(!tx.send(spotted(2)));
        assert_eq!(rx.drain().len(), 1);
    }

    #[test]
    fn test_disconnected_receiver() {
        let bus = EventBus::new(4);
        let tx = bus.sender();
        drop(bus);
        assert!(!tx.send(spotted(1)));
    }
}
