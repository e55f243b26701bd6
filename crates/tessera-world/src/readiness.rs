//! One-shot "height data available" notification.

use crossbeam_channel::{Receiver, Sender, bounded};

/// Fires at most once. Each subscriber receives exactly one `()`, immediately
/// if the signal has already fired, after which its channel disconnects.
#[derive(Debug, Default)]
pub struct ReadySignal {
    fired: bool,
    subscribers: Vec<Sender<()>>,
}

impl ReadySignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.fired
    }

    /// Mark ready and notify subscribers. Returns `true` only on the first call.
    pub fn fire(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        for sender in self.subscribers.drain(..) {
            // A dropped receiver just means nobody is waiting any more.
            let _ = sender.send(());
        }
        true
    }

    pub fn subscribe(&mut self) -> Receiver<()> {
        let (sender, receiver) = bounded(1);
        if self.fired {
            let _ = sender.send(());
        } else {
            self.subscribers.push(sender);
        }
        receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_is_one_shot() {
        let mut signal = ReadySignal::new();
        assert!(!signal.is_ready());
        assert!(signal.fire());
        assert!(!signal.fire());
        assert!(signal.is_ready());
    }

    #[test]
    fn test_subscriber_receives_exactly_once() {
        let mut signal = ReadySignal::new();
        let rx = signal.subscribe();
        assert!(rx.try_recv().is_err());

        signal.fire();
        signal.fire();
        assert_eq!(rx.recv(), Ok(()));
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_late_subscriber_is_notified_immediately() {
        let mut signal = ReadySignal::new();
        signal.fire();
        let rx = signal.subscribe();
        assert_eq!(rx.try_recv(), Ok(()));
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_cross_thread_wait() {
        let mut signal = ReadySignal::new();
        let rx = signal.subscribe();
        let waiter = std::thread::spawn(move || rx.recv().is_ok());
        signal.fire();
        assert!(waiter.join().unwrap());
    }
}
