#![forbid(unsafe_code)]

//! Shared, version-tracked state container with change notification.
//!
//! # Design
//!
//! [`Store<S>`] wraps its state in shared, reference-counted storage.
//! Writers replace the whole state value; a replace that leaves the state
//! equal to the current value is a no-op. Every applied change bumps a
//! version counter and notifies subscribers in registration order.
//!
//! Subscribers are held as `Weak` callbacks. The strong half lives inside
//! the returned [`Subscription`]; dropping it makes the slot dead, and dead
//! slots are pruned lazily on the next notification.
//!
//! # Failure Modes
//!
//! - **Listener panics**: the panic propagates to the writer; remaining
//!   listeners in that cycle are skipped. State is already updated.
//! - **Listener writes back into the store**: allowed — the state borrow is
//!   released before listeners run — but each write starts a fresh
//!   notification cycle, so a listener that writes unconditionally will
//!   recurse until equality stops it.
//! - **Read closure writes back**: [`Store::with`] holds the borrow while
//!   the closure runs; calling a write method from inside it panics on the
//!   re-entrant borrow.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shared interior for [`Store<S>`].
struct StoreInner<S> {
    state: S,
    /// Monotonically increasing, bumped once per applied change.
    version: u64,
    /// Weak subscriber slots, in registration order.
    subscribers: Vec<Weak<dyn Fn(&S)>>,
}

/// A single-threaded reactive state container.
///
/// Cloning a `Store` creates a new handle to the **same** inner state.
pub struct Store<S> {
    inner: Rc<RefCell<StoreInner<S>>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("state", &inner.state)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// RAII guard keeping one subscriber callback alive.
///
/// Dropping the guard releases the callback; the store prunes the dead slot
/// before the next notification cycle. The guard is type-erased so guards
/// for stores of different state types can be collected together.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish()
    }
}

impl<S: Clone + PartialEq + 'static> Store<S> {
    /// Construct a store from an initial-state factory.
    ///
    /// The factory runs exactly once, inside the constructor.
    pub fn new(init: impl FnOnce() -> S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                state: init(),
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Current state, by clone.
    #[must_use]
    pub fn get(&self) -> S {
        self.inner.borrow().state.clone()
    }

    /// Access the current state by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure writes back into this store (re-entrant
    /// borrow).
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.borrow().state)
    }

    /// Current version. Increments by 1 per applied change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Replace the state.
    ///
    /// A replace equal to the current state is a no-op: no version bump,
    /// no notifications.
    pub fn set(&self, next: S) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state == next {
                return;
            }
            inner.state = next;
            inner.version += 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(message = "store.set", version = inner.version);
        }
        self.notify();
    }

    /// Replace the state through an updater that observes the latest state.
    ///
    /// The updater runs under the state borrow, so the state it sees is the
    /// state the write applies against — concurrent logical tasks cannot
    /// interleave a write between the read and the replace.
    pub fn update(&self, f: impl FnOnce(&S) -> S) {
        let next = f(&self.inner.borrow().state);
        self.set(next);
    }

    /// Fallible variant of [`Store::update`].
    ///
    /// When the updater fails the state is left untouched: no version bump,
    /// no notifications.
    pub fn try_update<E>(&self, f: impl FnOnce(&S) -> Result<S, E>) -> Result<(), E> {
        let next = f(&self.inner.borrow().state)?;
        self.set(next);
        Ok(())
    }

    /// Register a listener invoked on every applied change.
    ///
    /// Listeners run in registration order, after the state borrow has been
    /// released. The listener stays registered for as long as the returned
    /// [`Subscription`] is alive.
    #[must_use]
    pub fn subscribe(&self, listener: impl Fn(&S) + 'static) -> Subscription {
        let strong: Rc<dyn Fn(&S)> = Rc::new(listener);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of live subscriber slots (dead slots may linger until the
    /// next notification prunes them).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|slot| slot.strong_count() > 0)
            .count()
    }

    fn notify(&self) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|slot| slot.strong_count() > 0);
            let listeners: Vec<Rc<dyn Fn(&S)>> = inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect();
            (inner.state.clone(), listeners)
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl<S: Clone + PartialEq + Default + 'static> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
