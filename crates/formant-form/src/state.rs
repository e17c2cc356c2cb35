#![forbid(unsafe_code)]

//! State shapes owned by the form and field stores.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Bounds a type must satisfy to act as a form-data shape.
///
/// Path reads and writes go through the serialized `serde_json::Value`
/// form of the data, so the shape must round-trip through serde. `Default`
/// is the fallback when no default values are configured.
pub trait FormData:
    Clone + PartialEq + Default + Serialize + DeserializeOwned + 'static
{
}

impl<T> FormData for T where
    T: Clone + PartialEq + Default + Serialize + DeserializeOwned + 'static
{
}

/// Full state of one form, held in the form's store.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<D> {
    /// Current form data. Mutated only through path writes.
    pub values: D,
    /// True only immediately after a submission attempt settled without
    /// error.
    pub is_submitted: bool,
    /// True strictly for the span of a submission attempt, external
    /// callback included.
    pub is_submitting: bool,
    /// Incremented once per `handle_submit` call, before the external
    /// callback runs.
    pub submission_attempts: u64,
    /// Latest output of the injected form-level validator; empty when no
    /// validator is configured. Opaque to the engine.
    pub errors: Vec<String>,
}

impl<D: FormData> FormState<D> {
    /// Initial state for a form with the given starting values.
    #[must_use]
    pub fn initial(values: D) -> Self {
        Self {
            values,
            is_submitted: false,
            is_submitting: false,
            submission_attempts: 0,
            errors: Vec::new(),
        }
    }
}

impl<D: FormData> Default for FormState<D> {
    fn default() -> Self {
        Self::initial(D::default())
    }
}

/// Interaction history for one mounted field.
///
/// `is_touched` and `is_blurred` are one-way flags: the first blur sets
/// them and nothing in this engine resets them for the lifetime of the
/// field handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    pub is_touched: bool,
    pub is_blurred: bool,
    /// Whether the current value diverges from the value observed when the
    /// field handle was constructed.
    pub is_dirty: bool,
    /// Latest output of the injected field-level validator.
    pub errors: Vec<String>,
}

/// Transient interaction state, toggled by focus/blur only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldInteraction {
    pub has_focus: bool,
}

/// Full state of one mounted field, held in the field's store.
///
/// Does not persist across unmount/remount: a fresh field handle starts
/// from the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub meta: FieldMeta,
    pub interaction: FieldInteraction,
}
