#![forbid(unsafe_code)]

//! Reactive store primitive for Formant.
//!
//! This crate provides the change-tracking container the form engine is
//! built on:
//!
//! - [`Store`]: a shared, version-tracked state container with
//!   replace-by-value and replace-by-updater writes and change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`Store::watch`]: a selector + equality hook that re-invokes a
//!   callback only when the selected slice of state changes.
//!
//! # Architecture
//!
//! `Store<S>` uses `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Subscribers are stored as `Weak` function pointers and cleaned up lazily
//! during notification. Each state replace is applied under a single borrow
//! (no torn reads); listeners run after the borrow is released.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per applied change.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version
//!    bump, no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. [`Store::update`] observes the latest state at write time; there is
//!    no window for a stale-snapshot read-modify-write.

pub mod store;
pub mod watch;

pub use store::{Store, Subscription};
