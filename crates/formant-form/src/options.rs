#![forbid(unsafe_code)]

//! Construction options for [`FormApi`](crate::FormApi).

use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::error::SubmitError;
use crate::state::FormData;

/// Argument bundle passed to the external submit callback.
///
/// Values are read once, at invocation time; edits made while the callback
/// is pending are not re-read mid-flight.
#[derive(Debug, Clone)]
pub struct SubmitArgs<D> {
    pub values: D,
}

pub(crate) type SubmitHandler<D> =
    Rc<dyn Fn(SubmitArgs<D>) -> LocalBoxFuture<'static, Result<(), SubmitError>>>;

pub(crate) type FormValidator<D> = Rc<dyn Fn(&D) -> Vec<String>>;

/// Builder-style options for a [`FormApi`](crate::FormApi).
pub struct FormOptions<D: FormData> {
    pub(crate) default_values: Option<D>,
    pub(crate) on_submit: Option<SubmitHandler<D>>,
    pub(crate) validator: Option<FormValidator<D>>,
}

impl<D: FormData> FormOptions<D> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_values: None,
            on_submit: None,
            validator: None,
        }
    }

    /// Starting values. Falls back to `D::default()` when unset.
    #[must_use]
    pub fn default_values(mut self, values: D) -> Self {
        self.default_values = Some(values);
        self
    }

    /// External submit callback. Value delivery is entirely the callback's
    /// concern; the engine only orchestrates state around it.
    #[must_use]
    pub fn on_submit<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(SubmitArgs<D>) -> Fut + 'static,
        Fut: Future<Output = Result<(), SubmitError>> + 'static,
    {
        self.on_submit = Some(Rc::new(move |args| handler(args).boxed_local()));
        self
    }

    /// Injected form-level validator, run after every applied value write.
    /// Returned strings land verbatim in `FormState::errors`.
    #[must_use]
    pub fn validator(mut self, validator: impl Fn(&D) -> Vec<String> + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }
}

impl<D: FormData> Default for FormOptions<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: FormData + std::fmt::Debug> std::fmt::Debug for FormOptions<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormOptions")
            .field("default_values", &self.default_values)
            .field("on_submit", &self.on_submit.is_some())
            .field("validator", &self.validator.is_some())
            .finish()
    }
}
