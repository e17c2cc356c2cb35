#![forbid(unsafe_code)]

//! Form-state engine: `FormApi`, `FieldApi`, and the submission lifecycle.
//!
//! A [`FormApi`] is the single source of truth for one logical form: it owns
//! a reactive [`Store`](formant_store::Store) holding the form values and
//! submission flags, and every value mutation goes through path-addressed
//! [`FormApi::set_field_value`] writes. A [`FieldApi`] is a thin per-mount
//! handle bound to one form and one path; it owns its own, smaller store
//! for focus/touch/dirty metadata and delegates all value writes back to
//! the owning form.
//!
//! Submission is a six-step machine (`attempt counted` → `submitting` →
//! external callback → settle → cleanup) whose failure path re-surfaces the
//! callback's error to the caller unchanged — never swallowed.

pub mod error;
pub mod field;
pub mod form;
pub mod options;
pub mod state;

pub use error::{FormError, SubmitError};
pub use field::{FieldApi, FieldOptions};
pub use form::FormApi;
pub use options::{FormOptions, SubmitArgs};
pub use state::{FieldInteraction, FieldMeta, FieldState, FormData, FormState};
