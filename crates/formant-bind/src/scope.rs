#![forbid(unsafe_code)]

//! Scope-bound construction and subscription lifetimes.
//!
//! UI render functions re-run; API handles must not. [`FormScope`] and
//! [`FieldScope`] cache one instance per owning scope so the constructor
//! runs exactly once no matter how many times the accessor is called.
//! [`RenderScope`] collects the subscriptions a component creates while
//! rendering and releases them together when the scope is dropped.
//!
//! # Invariants
//!
//! 1. A scope's `use_*` initializer runs at most once for the scope's
//!    lifetime; every call returns a handle to the same instance.
//! 2. After a `RenderScope` drops, none of its callbacks fire again.
//! 3. `RenderScope::clear` releases all subscriptions immediately; the
//!    scope stays reusable.

use std::cell::OnceCell;
use std::rc::Rc;

use formant_form::{FieldApi, FieldOptions, FormApi, FormData, FormOptions};
use formant_store::Subscription;

/// Construct-once cache for a [`FormApi`].
///
/// Owns the form for the scope's lifetime; clones of the returned `Rc` keep
/// it alive in fields and subscriptions.
pub struct FormScope<D: FormData> {
    cell: OnceCell<Rc<FormApi<D>>>,
}

impl<D: FormData> FormScope<D> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Get the scope's form, constructing it on first call.
    pub fn use_form(&self, init: impl FnOnce() -> FormOptions<D>) -> Rc<FormApi<D>> {
        Rc::clone(self.cell.get_or_init(|| Rc::new(FormApi::new(init()))))
    }
}

impl<D: FormData> Default for FormScope<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Construct-once cache for a [`FieldApi`], one per field mount.
pub struct FieldScope<D: FormData> {
    cell: OnceCell<Rc<FieldApi<D>>>,
}

impl<D: FormData> FieldScope<D> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Get the scope's field handle, constructing it on first call.
    pub fn use_field(&self, init: impl FnOnce() -> FieldOptions<D>) -> Rc<FieldApi<D>> {
        Rc::clone(self.cell.get_or_init(|| Rc::new(FieldApi::new(init()))))
    }
}

impl<D: FormData> Default for FieldScope<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects subscriptions for a logical scope (e.g. one component).
///
/// Dropping the scope releases every held subscription, cleanly
/// disconnecting the component from the stores it was watching.
pub struct RenderScope {
    subscriptions: Vec<Subscription>,
}

impl RenderScope {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Hold a subscription until the scope drops or is cleared.
    pub fn hold(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release all held subscriptions immediately (scope stays reusable).
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl Default for RenderScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RenderScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderScope")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
