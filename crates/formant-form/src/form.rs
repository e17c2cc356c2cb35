#![forbid(unsafe_code)]

//! The form handle: single source of truth for values and submission
//! lifecycle.
//!
//! # Invariants
//!
//! 1. `is_submitting` and `is_submitted` are never both true.
//! 2. `submission_attempts` increments exactly once per `handle_submit`
//!    call, in the same state transition that clears `is_submitted`.
//! 3. A failed write leaves the store untouched (no version bump, no
//!    notifications).
//! 4. The previous values snapshot is never mutated by a write; consumers
//!    may keep references to old snapshots indefinitely.
//!
//! # Failure Modes
//!
//! - **Submit callback fails**: the error is logged and returned to the
//!   caller unchanged; `is_submitting` is still cleared.
//! - **Write off the data shape**: the serialized tree no longer
//!   deserializes into `D`; the write fails with `FormError::Shape` and
//!   state is unchanged.

use formant_path::FieldPath;
use formant_store::Store;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FormError, SubmitError};
use crate::options::{FormOptions, SubmitArgs};
use crate::state::{FormData, FormState};

/// Owner of one logical form's reactive state.
///
/// Constructed once per logical form and shared (typically behind an `Rc`)
/// with every field handle and subscriber; field handles come and go with
/// their UI mounts while the form survives.
pub struct FormApi<D: FormData> {
    store: Store<FormState<D>>,
    options: FormOptions<D>,
}

impl<D: FormData> FormApi<D> {
    pub fn new(options: FormOptions<D>) -> Self {
        let initial = FormState::initial(
            options.default_values.clone().unwrap_or_default(),
        );
        tracing::debug!(message = "form.new");
        Self {
            store: Store::new(move || initial),
            options,
        }
    }

    /// The form's reactive store. Exposed for subscriptions; writes must go
    /// through the methods on this handle.
    #[must_use]
    pub fn store(&self) -> &Store<FormState<D>> {
        &self.store
    }

    /// Snapshot of the full form state.
    #[must_use]
    pub fn state(&self) -> FormState<D> {
        self.store.get()
    }

    /// Snapshot of the current values.
    #[must_use]
    pub fn values(&self) -> D {
        self.store.with(|s| s.values.clone())
    }

    /// Whether the form is currently submittable: no validator errors and
    /// no submission in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.store.with(|s| s.errors.is_empty() && !s.is_submitting)
    }

    /// Read the value at `path`.
    ///
    /// Absent paths read as `Ok(None)`; only malformed path syntax is an
    /// error. A present-but-empty value (`0`, `false`, `""`, `null`) is
    /// returned, not treated as absent.
    pub fn get_field_value(&self, path: impl AsRef<str>) -> Result<Option<Value>, FormError> {
        let path: FieldPath = path.as_ref().parse()?;
        let tree = self.value_tree()?;
        Ok(path.resolve(&tree).cloned())
    }

    /// Strict read: fails with [`FormError::FieldValueNotFound`] when the
    /// path does not resolve.
    pub fn get_field_value_strict(&self, path: impl AsRef<str>) -> Result<Value, FormError> {
        let path: FieldPath = path.as_ref().parse()?;
        let tree = self.value_tree()?;
        path.resolve(&tree)
            .cloned()
            .ok_or(FormError::FieldValueNotFound { path })
    }

    /// Typed read through serde.
    pub fn get_field_value_as<T: DeserializeOwned>(
        &self,
        path: impl AsRef<str>,
    ) -> Result<Option<T>, FormError> {
        match self.get_field_value(path)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Write `value` at `path`.
    ///
    /// The write is a copy-on-write deep update applied against the latest
    /// state inside the store's updater — a concurrent write to a different
    /// path can never be clobbered by a stale snapshot. The previous values
    /// object is not mutated. When a form-level validator is configured it
    /// runs against the new values and its output replaces
    /// `FormState::errors`.
    pub fn set_field_value(
        &self,
        path: impl AsRef<str>,
        value: impl Into<Value>,
    ) -> Result<(), FormError> {
        let path: FieldPath = path.as_ref().parse()?;
        self.set_value_at(&path, value.into())
    }

    pub(crate) fn set_value_at(&self, path: &FieldPath, value: Value) -> Result<(), FormError> {
        self.store.try_update::<FormError>(|state| {
            let mut tree = serde_json::to_value(&state.values).map_err(FormError::Codec)?;
            path.write(&mut tree, value)?;
            let values: D = serde_json::from_value(tree).map_err(|source| FormError::Shape {
                path: path.clone(),
                source,
            })?;
            let errors = match &self.options.validator {
                Some(validator) => validator(&values),
                None => state.errors.clone(),
            };
            Ok(FormState {
                values,
                errors,
                ..state.clone()
            })
        })?;
        tracing::trace!(message = "form.set_field_value", path = %path);
        Ok(())
    }

    /// Read the value at an already-parsed path; serialization failures
    /// read as absence (logged).
    pub(crate) fn peek(&self, path: &FieldPath) -> Option<Value> {
        match self.value_tree() {
            Ok(tree) => path.resolve(&tree).cloned(),
            Err(err) => {
                tracing::warn!(message = "form.peek_failed", error = %err);
                None
            }
        }
    }

    fn value_tree(&self) -> Result<Value, FormError> {
        self.store
            .with(|s| serde_json::to_value(&s.values))
            .map_err(FormError::Codec)
    }

    /// Run one submission attempt.
    ///
    /// 1. Count the attempt and clear `is_submitted` — one atomic update.
    /// 2. Raise `is_submitting` — a second, separately observable update,
    ///    so attempt-count watchers fire independently of the flag.
    /// 3. Invoke the external callback with the values read once, now.
    /// 4. On success, raise `is_submitted` and clear `is_submitting` in one
    ///    transition — the two flags are never observable both true.
    /// 5. On failure, leave `is_submitted` false, log, and return the
    ///    callback's error unchanged.
    /// 6. Clear `is_submitting` on both paths before returning.
    ///
    /// Overlapping calls are not guarded: each runs all six steps and the
    /// flags settle last-write-wins. Hosts wanting exactly-once-in-flight
    /// should check `state().is_submitting` before calling.
    pub async fn handle_submit(&self) -> Result<(), SubmitError> {
        self.store.update(|s| FormState {
            is_submitted: false,
            submission_attempts: s.submission_attempts + 1,
            ..s.clone()
        });
        self.store.update(|s| FormState {
            is_submitting: true,
            ..s.clone()
        });
        tracing::debug!(
            message = "form.submit",
            attempt = self.store.with(|s| s.submission_attempts)
        );

        let values = self.store.with(|s| s.values.clone());
        let result = match &self.options.on_submit {
            Some(on_submit) => on_submit(SubmitArgs { values }).await,
            None => Ok(()),
        };

        match &result {
            Ok(()) => {
                // Raised together with the submitting reset: subscribers
                // must never observe both flags true.
                self.store.update(|s| FormState {
                    is_submitted: true,
                    is_submitting: false,
                    ..s.clone()
                });
            }
            Err(err) => {
                tracing::error!(message = "form.submit_failed", error = %err);
            }
        }
        // Unconditional cleanup; a no-op on the success path.
        self.store.update(|s| FormState {
            is_submitting: false,
            ..s.clone()
        });
        result
    }

    /// Restore the constructor's initial state: default values, cleared
    /// flags, attempt counter zeroed.
    pub fn reset(&self) {
        let initial = FormState::initial(
            self.options.default_values.clone().unwrap_or_default(),
        );
        self.store.set(initial);
        tracing::debug!(message = "form.reset");
    }
}

impl<D: FormData + std::fmt::Debug> std::fmt::Debug for FormApi<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormApi")
            .field("state", &self.store.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
