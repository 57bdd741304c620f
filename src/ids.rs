use crate::error::{Error, Result};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

//===========================================================================//

/// A source of numeric resource IDs shared by every builder contributing to
/// one resource table.
///
/// Implementations must never hand out the same value twice over their
/// lifetime, no matter how many threads draw from them at once.
pub trait IdSource: Send + Sync {
    /// Takes the next unused ID, blocking until one is available.
    fn next_id(&self) -> Result<u16>;
}

impl<T: IdSource + ?Sized> IdSource for &T {
    fn next_id(&self) -> Result<u16> {
        (**self).next_id()
    }
}

impl<T: IdSource + ?Sized> IdSource for Arc<T> {
    fn next_id(&self) -> Result<u16> {
        (**self).next_id()
    }
}

//===========================================================================//

/// An ID source counting upwards from a starting value.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU32,
}

impl IdSequence {
    /// Creates a sequence whose first ID is 1.
    pub fn new() -> IdSequence {
        IdSequence::starting_at(1)
    }

    /// Creates a sequence whose first ID is `first`.
    pub fn starting_at(first: u16) -> IdSequence {
        IdSequence { next: AtomicU32::new(first as u32) }
    }
}

impl Default for IdSequence {
    fn default() -> IdSequence {
        IdSequence::new()
    }
}

impl IdSource for IdSequence {
    fn next_id(&self) -> Result<u16> {
        let limit = u16::MAX as u32;
        match self.next.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
            if n <= limit {
                Some(n + 1)
            } else {
                None
            }
        }) {
            Ok(id) => Ok(id as u16),
            Err(_) => Err(Error::IdsExhausted),
        }
    }
}

//===========================================================================//

/// An ID source fed by an external producer over a channel.
#[derive(Debug)]
pub struct IdChannel {
    receiver: Mutex<Receiver<u16>>,
}

impl IdChannel {
    /// Wraps the receiving end of a channel.  The producer is trusted to
    /// never send the same value twice.
    pub fn new(receiver: Receiver<u16>) -> IdChannel {
        IdChannel { receiver: Mutex::new(receiver) }
    }

    /// Spawns a producer thread that feeds the values of `ids` through a
    /// rendezvous channel, one at a time as they are taken.  The thread
    /// stops once `ids` runs out or the returned source is dropped.
    pub fn spawn<I>(ids: I) -> IdChannel
    where
        I: IntoIterator<Item = u16>,
        I::IntoIter: Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(0);
        let ids = ids.into_iter();
        thread::spawn(move || {
            for id in ids {
                if sender.send(id).is_err() {
                    break;
                }
            }
        });
        IdChannel::new(receiver)
    }
}

impl IdSource for IdChannel {
    fn next_id(&self) -> Result<u16> {
        let receiver =
            self.receiver.lock().unwrap_or_else(PoisonError::into_inner);
        receiver.recv().map_err(|_| Error::IdsExhausted)
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{IdChannel, IdSequence, IdSource};
    use std::collections::HashSet;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn sequence_counts_up() {
        let ids = IdSequence::starting_at(101);
        assert_eq!(ids.next_id().unwrap(), 101);
        assert_eq!(ids.next_id().unwrap(), 102);
        assert_eq!(IdSequence::new().next_id().unwrap(), 1);
    }

    #[test]
    fn sequence_runs_out_after_max() {
        let ids = IdSequence::starting_at(u16::MAX - 1);
        assert_eq!(ids.next_id().unwrap(), u16::MAX - 1);
        assert_eq!(ids.next_id().unwrap(), u16::MAX);
        assert!(ids.next_id().is_err());
        assert!(ids.next_id().is_err());
    }

    #[test]
    fn sequence_is_unique_across_threads() {
        let ids = Arc::new(IdSequence::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || {
                    (0..500).map(|_| ids.next_id().unwrap()).collect::<Vec<_>>()
                })
            })
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "ID {} was issued twice", id);
            }
        }
        assert_eq!(seen.len(), 2000);
    }

    #[test]
    fn channel_yields_values_in_order() {
        let ids = IdChannel::spawn(vec![5, 6, 9]);
        assert_eq!(ids.next_id().unwrap(), 5);
        assert_eq!(ids.next_id().unwrap(), 6);
        assert_eq!(ids.next_id().unwrap(), 9);
        assert!(ids.next_id().is_err());
    }

    #[test]
    fn channel_reports_disconnected_producer() {
        let (sender, receiver) = mpsc::channel();
        sender.send(42).unwrap();
        drop(sender);
        let ids = IdChannel::new(receiver);
        assert_eq!(ids.next_id().unwrap(), 42);
        assert!(ids.next_id().is_err());
    }
}

//===========================================================================//
