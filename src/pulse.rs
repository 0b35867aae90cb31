//! Transition notifications
//!
//! Every limb of an organism shares one [`Nerves`] bundle. Limbs fire an
//! event into it when they actually change state, and each subscriber
//! receives every event fired after it subscribed.

use crossbeam::channel::{Receiver, Sender, unbounded};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// State change of a single limb
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimbEvent {
    /// A limb was added to the organism
    Grown { name: String },
    /// A limb became ready
    Ready { name: String },
    /// A limb died
    Died { name: String },
}

impl LimbEvent {
    /// Name of the limb the event is about
    pub fn name(&self) -> &str {
        match self {
            LimbEvent::Grown { name } | LimbEvent::Ready { name } | LimbEvent::Died { name } => {
                name
            }
        }
    }
}

impl fmt::Display for LimbEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimbEvent::Grown { name } => write!(f, "limb '{}' grown", name),
            LimbEvent::Ready { name } => write!(f, "limb '{}' ready", name),
            LimbEvent::Died { name } => write!(f, "limb '{}' died", name),
        }
    }
}

/// Fan-out of limb events to subscribers
#[derive(Debug, Default)]
pub(crate) struct Nerves {
    subscribers: Mutex<Vec<Sender<LimbEvent>>>,
}

impl Nerves {
    /// Register a new subscriber
    pub(crate) fn subscribe(&self) -> Receiver<LimbEvent> {
        let (tx, rx) = unbounded();
        self.lock().push(tx);
        rx
    }

    /// Deliver an event to every live subscriber
    pub(crate) fn fire(&self, event: LimbEvent) {
        // Senders whose receiver hung up are pruned here
        self.lock().retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sender<LimbEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_without_subscribers() {
        let nerves = Nerves::default();
        nerves.fire(LimbEvent::Died {
            name: "core".into(),
        });
        assert_eq!(nerves.subscriber_count(), 0);
    }

    #[test]
    fn test_every_subscriber_receives() {
        let nerves = Nerves::default();
        let first = nerves.subscribe();
        let second = nerves.subscribe();

        nerves.fire(LimbEvent::Ready {
            name: "http".into(),
        });

        for rx in [first, second] {
            assert_eq!(
                rx.try_recv().unwrap(),
                LimbEvent::Ready {
                    name: "http".into()
                }
            );
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        let nerves = Nerves::default();
        nerves.fire(LimbEvent::Grown {
            name: "core".into(),
        });
        let rx = nerves.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_pruned() {
        let nerves = Nerves::default();
        let kept = nerves.subscribe();
        drop(nerves.subscribe());
        assert_eq!(nerves.subscriber_count(), 2);

        nerves.fire(LimbEvent::Died {
            name: "grpc".into(),
        });

        assert_eq!(nerves.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap().name(), "grpc");
    }

    #[test]
    fn test_event_display() {
        let event = LimbEvent::Died {
            name: "worker".into(),
        };
        assert_eq!(event.to_string(), "limb 'worker' died");
    }
}
