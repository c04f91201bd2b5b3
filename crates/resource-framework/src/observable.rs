//! # Observable Cells
//!
//! An [`Observable<T>`] is a latest-value cell: readers can look at the current value
//! synchronously or subscribe and wake up on every replacement. It is a thin layer over
//! `tokio::sync::watch`, which already gives us exactly that contract.
//!
//! View-model slots are observables of `Resource<T>`; the application settings cell is
//! an observable of plain settings.

use tokio::sync::watch;

/// Subscription to an [`Observable`]. Read with `borrow()`, wait with `changed()` or
/// `wait_for()`.
pub type Watcher<T> = watch::Receiver<T>;

/// A latest-value cell with wholesale replacement.
#[derive(Debug)]
pub struct Observable<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replaces the current value and notifies every subscriber.
    ///
    /// Works with zero subscribers; the value is kept for the next reader.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Replaces the current value with one derived from it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = {
            let current = self.sender.borrow();
            f(&current)
        };
        self.set(next);
    }

    pub fn subscribe(&self) -> Watcher<T> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
