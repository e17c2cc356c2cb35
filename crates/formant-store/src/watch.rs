#![forbid(unsafe_code)]

//! Selector-scoped subscriptions.
//!
//! [`Store::watch`] narrows a subscription to a slice of state: a selector
//! maps the full state to a derived value, and the callback fires only when
//! that value differs from the previously selected one. This is what makes
//! form-level and field-level subscriptions cheap — a watcher of the
//! submission counter is never woken by value edits.
//!
//! # Invariants
//!
//! 1. The callback fires at most once per applied store change.
//! 2. The callback never fires when `selector(state)` equals the previous
//!    selection.
//! 3. Registering a watch does not invoke the callback; the first firing
//!    is the first post-registration change to the selected slice.

use std::cell::RefCell;

use crate::store::{Store, Subscription};

impl<S: Clone + PartialEq + 'static> Store<S> {
    /// Subscribe to a slice of state.
    ///
    /// `on_change` is invoked with the freshly selected value whenever an
    /// applied change makes `selector(state)` differ from the previous
    /// selection. The comparison is `PartialEq` on the selected type.
    #[must_use]
    pub fn watch<T>(
        &self,
        selector: impl Fn(&S) -> T + 'static,
        on_change: impl Fn(&T) + 'static,
    ) -> Subscription
    where
        T: Clone + PartialEq + 'static,
    {
        let last = RefCell::new(self.with(|s| selector(s)));
        self.subscribe(move |state| {
            let next = selector(state);
            let changed = {
                let mut last = last.borrow_mut();
                if *last == next {
                    false
                } else {
                    *last = next.clone();
                    true
                }
            };
            // Borrow released before the callback so it may write back.
            if changed {
                on_change(&next);
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
