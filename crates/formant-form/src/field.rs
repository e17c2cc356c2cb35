#![forbid(unsafe_code)]

//! The per-field handle: change/focus/blur handlers and field-local
//! interaction metadata.
//!
//! A `FieldApi` lives for one UI mount of one field. It owns a small store
//! of interaction state (focus, touched, blurred, dirty) and delegates all
//! value reads and writes to the owning form through its path. Meta state
//! does not survive unmount/remount — a remounted field starts fresh.

use std::rc::Rc;

use formant_path::FieldPath;
use formant_store::{Store, Subscription};
use serde_json::Value;

use crate::error::FormError;
use crate::form::FormApi;
use crate::state::{FieldState, FormData};

pub(crate) type FieldValidator = Rc<dyn Fn(&Value) -> Option<String>>;

/// Construction options for a [`FieldApi`].
pub struct FieldOptions<D: FormData> {
    pub(crate) name: FieldPath,
    pub(crate) form: Rc<FormApi<D>>,
    pub(crate) validator: Option<FieldValidator>,
}

impl<D: FormData> FieldOptions<D> {
    /// Bind a field to `form` at `name`, parsing the path.
    pub fn new(form: Rc<FormApi<D>>, name: impl AsRef<str>) -> Result<Self, FormError> {
        Ok(Self::with_path(form, name.as_ref().parse()?))
    }

    /// Bind a field to `form` at an already-parsed path.
    #[must_use]
    pub fn with_path(form: Rc<FormApi<D>>, name: FieldPath) -> Self {
        Self {
            name,
            form,
            validator: None,
        }
    }

    /// Injected field-level validator, run on every `handle_change`. Its
    /// output lands verbatim in `FieldMeta::errors`.
    #[must_use]
    pub fn validator(mut self, validator: impl Fn(&Value) -> Option<String> + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }
}

/// Per-mount handle for one field of one form.
///
/// Holds a non-owning-in-spirit handle to its form (the form always
/// outlives its mounted fields) used solely to delegate value reads and
/// writes.
pub struct FieldApi<D: FormData> {
    name: FieldPath,
    form: Rc<FormApi<D>>,
    store: Store<FieldState>,
    /// Value observed at construction; the dirty baseline.
    baseline: Option<Value>,
    validator: Option<FieldValidator>,
    /// Diagnostic state logger, alive for the field's lifetime.
    _diag: Subscription,
}

impl<D: FormData> FieldApi<D> {
    pub fn new(options: FieldOptions<D>) -> Self {
        let FieldOptions {
            name,
            form,
            validator,
        } = options;

        let store: Store<FieldState> = Store::default();
        let baseline = form.peek(&name);
        let diag = {
            let name = name.clone();
            store.subscribe(move |state: &FieldState| {
                tracing::trace!(
                    message = "field.state",
                    field = %name,
                    touched = state.meta.is_touched,
                    blurred = state.meta.is_blurred,
                    dirty = state.meta.is_dirty,
                    focus = state.interaction.has_focus,
                );
            })
        };
        tracing::debug!(message = "field.new", field = %name);

        Self {
            name,
            form,
            store,
            baseline,
            validator,
            _diag: diag,
        }
    }

    /// The field's path.
    #[must_use]
    pub fn name(&self) -> &FieldPath {
        &self.name
    }

    /// The owning form.
    #[must_use]
    pub fn form(&self) -> &Rc<FormApi<D>> {
        &self.form
    }

    /// The field's reactive store (meta + interaction state).
    #[must_use]
    pub fn store(&self) -> &Store<FieldState> {
        &self.store
    }

    /// Snapshot of the field state.
    #[must_use]
    pub fn state(&self) -> FieldState {
        self.store.get()
    }

    /// Current value at this field's path, read through the form.
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        self.form.peek(&self.name)
    }

    /// Write a value through the owning form.
    pub fn set_value(&self, value: impl Into<Value>) -> Result<(), FormError> {
        self.form.set_value_at(&self.name, value.into())
    }

    /// UI-facing alias of [`FieldApi::set_value`] for event bindings; also
    /// refreshes dirty tracking and runs the injected validator.
    pub fn handle_change(&self, value: impl Into<Value>) -> Result<(), FormError> {
        let value = value.into();
        let is_dirty = self.baseline.as_ref() != Some(&value);
        let errors: Vec<String> = self
            .validator
            .as_ref()
            .and_then(|validator| validator(&value))
            .into_iter()
            .collect();

        self.form.set_value_at(&self.name, value)?;
        self.store.update(|state| {
            let mut next = state.clone();
            next.meta.is_dirty = is_dirty;
            next.meta.errors = errors;
            next
        });
        Ok(())
    }

    /// Focus gained. Touch metadata is untouched.
    pub fn handle_focus(&self) {
        self.store.update(|state| {
            let mut next = state.clone();
            next.interaction.has_focus = true;
            next
        });
    }

    /// Focus lost. The first blur marks the field touched and blurred;
    /// later blurs only clear focus.
    pub fn handle_blur(&self) {
        self.store.update(|state| {
            let mut next = state.clone();
            next.interaction.has_focus = false;
            if !state.meta.is_blurred {
                next.meta.is_touched = true;
                next.meta.is_blurred = true;
            }
            next
        });
    }
}

impl<D: FormData> std::fmt::Debug for FieldApi<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldApi")
            .field("name", &self.name.to_string())
            .field("state", &self.store.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
