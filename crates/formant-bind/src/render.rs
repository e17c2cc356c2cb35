#![forbid(unsafe_code)]

//! Render-callback integration points.
//!
//! The children-as-function surface of the original render-prop style maps
//! to explicit callbacks here: a [`Field`] hands the UI a per-mount
//! [`FieldApi`], and a [`Subscribe`] drives a callback from a state slice.
//! Both are thin over the owning form; the selectivity guarantee (only the
//! selected slice re-renders) comes from the store's `watch`.

use std::rc::Rc;

use formant_form::{FieldApi, FieldOptions, FormApi, FormData, FormError, FormState};
use formant_path::FieldPath;
use formant_store::Subscription;

/// Render-prop integration point for one field.
///
/// `render` constructs the per-mount [`FieldApi`] and hands it to the
/// callback; the callback's return value is passed through, so hosts can
/// produce widgets, virtual nodes, or plain strings.
pub struct Field<D: FormData> {
    form: Rc<FormApi<D>>,
    name: FieldPath,
}

impl<D: FormData> Field<D> {
    pub fn new(form: &Rc<FormApi<D>>, name: impl AsRef<str>) -> Result<Self, FormError> {
        Ok(Self {
            form: Rc::clone(form),
            name: name.as_ref().parse()?,
        })
    }

    /// The field's path.
    #[must_use]
    pub fn name(&self) -> &FieldPath {
        &self.name
    }

    /// Mount a fresh [`FieldApi`] for this field.
    ///
    /// The handle's meta state starts clean; keep it alive for the UI
    /// mount's lifetime (see [`FieldScope`](crate::FieldScope) for
    /// caching across re-renders).
    #[must_use]
    pub fn mount(&self) -> FieldApi<D> {
        FieldApi::new(FieldOptions::with_path(
            Rc::clone(&self.form),
            self.name.clone(),
        ))
    }

    /// Mount and render in one step.
    pub fn render<R>(&self, render: impl FnOnce(&FieldApi<D>) -> R) -> R {
        let field = self.mount();
        render(&field)
    }
}

/// Render-prop integration point for a form-state slice.
///
/// The callback runs once immediately with the current slice, then again
/// on every applied change that alters the slice (`PartialEq` on the
/// selected type) — and never otherwise.
pub struct Subscribe<D: FormData, T> {
    form: Rc<FormApi<D>>,
    selector: Rc<dyn Fn(&FormState<D>) -> T>,
}

impl<D: FormData, T: Clone + PartialEq + 'static> Subscribe<D, T> {
    pub fn new(
        form: &Rc<FormApi<D>>,
        selector: impl Fn(&FormState<D>) -> T + 'static,
    ) -> Self {
        Self {
            form: Rc::clone(form),
            selector: Rc::new(selector),
        }
    }

    /// Drive `render` from the selected slice.
    ///
    /// Drop the returned [`Subscription`] to stop re-rendering.
    #[must_use]
    pub fn render(&self, render: impl Fn(&T) + 'static) -> Subscription {
        let current = self.form.store().with(|s| (self.selector)(s));
        render(&current);

        let selector = Rc::clone(&self.selector);
        self.form
            .store()
            .watch(move |state| selector(state), render)
    }
}

/// Ergonomic render-prop surface on a shared form handle, mirroring the
/// instance-method style of the original API.
pub trait FormApiExt<D: FormData> {
    /// `form.field("first_name")` — a [`Field`] integration point.
    fn field(&self, name: impl AsRef<str>) -> Result<Field<D>, FormError>;

    /// `form.subscribe_slice(selector, on_change)` — watch a slice of form
    /// state; fires only when the slice changes.
    fn subscribe_slice<T: Clone + PartialEq + 'static>(
        &self,
        selector: impl Fn(&FormState<D>) -> T + 'static,
        on_change: impl Fn(&T) + 'static,
    ) -> Subscription;
}

impl<D: FormData> FormApiExt<D> for Rc<FormApi<D>> {
    fn field(&self, name: impl AsRef<str>) -> Result<Field<D>, FormError> {
        Field::new(self, name)
    }

    fn subscribe_slice<T: Clone + PartialEq + 'static>(
        &self,
        selector: impl Fn(&FormState<D>) -> T + 'static,
        on_change: impl Fn(&T) + 'static,
    ) -> Subscription {
        self.store().watch(selector, on_change)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use formant_form::FormOptions;
    use serde::{Deserialize, Serialize};
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Names {
        first_name: String,
        last_name: String,
    }

    fn shared_form() -> Rc<FormApi<Names>> {
        Rc::new(FormApi::new(
            FormOptions::new().default_values(Names::default()),
        ))
    }

    #[test]
    fn field_render_hands_out_a_mounted_handle() {
        let form = shared_form();
        let field = form.field("first_name").unwrap();

        let rendered = field.render(|api| {
            api.handle_change("Ada").unwrap();
            format!("name={}", api.name())
        });

        assert_eq!(rendered, "name=first_name");
        assert_eq!(form.values().first_name, "Ada");
    }

    #[test]
    fn subscribe_renders_immediately_then_on_slice_changes() {
        let form = shared_form();
        let seen: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);

        let subscribe = Subscribe::new(&form, |s: &FormState<Names>| s.submission_attempts);
        let _sub = subscribe.render(move |attempts| seen_clone.borrow_mut().push(*attempts));

        // Initial render with the current slice.
        assert_eq!(*seen.borrow(), vec![0]);

        // Value edits leave the attempts slice untouched: no re-render.
        form.set_field_value("first_name", "Ada").unwrap();
        assert_eq!(*seen.borrow(), vec![0]);

        futures::executor::block_on(form.handle_submit()).unwrap();
        assert_eq!(*seen.borrow(), vec![0, 1]);
    }

    #[test]
    fn subscribe_selectivity_both_directions() {
        let form = shared_form();
        let value_renders = Rc::new(Cell::new(0u32));
        let v = Rc::clone(&value_renders);
        let _sub = Subscribe::new(&form, |s: &FormState<Names>| s.values.clone())
            .render(move |_| v.set(v.get() + 1));

        assert_eq!(value_renders.get(), 1); // initial
        form.set_field_value("first_name", "Ada").unwrap();
        assert_eq!(value_renders.get(), 2);

        // Identical write: equality-gated, no render.
        form.set_field_value("first_name", "Ada").unwrap();
        assert_eq!(value_renders.get(), 2);
    }

    #[test]
    fn dropping_the_subscription_stops_rendering() {
        let form = shared_form();
        let renders = Rc::new(Cell::new(0u32));
        let r = Rc::clone(&renders);
        let sub = form.subscribe_slice(
            |s| s.values.clone(),
            move |_| r.set(r.get() + 1),
        );

        form.set_field_value("first_name", "Ada").unwrap();
        assert_eq!(renders.get(), 1);

        drop(sub);
        form.set_field_value("first_name", "Grace").unwrap();
        assert_eq!(renders.get(), 1);
    }

    #[test]
    fn malformed_field_name_is_an_error() {
        let form = shared_form();
        assert!(form.field("a..b").is_err());
    }
}
