#![forbid(unsafe_code)]

//! Render/subscribe adapter for Formant.
//!
//! This crate connects a UI layer's re-render cycle to slices of form and
//! field state:
//!
//! - [`Subscribe`]: a selector over `FormState` plus a render callback,
//!   re-invoked only when the selected slice changes.
//! - [`Field`]: explicit render-callback integration point handing a
//!   [`FieldApi`](formant_form::FieldApi) to the UI.
//! - [`FormScope`] / [`FieldScope`]: construct-once-per-scope caches so a
//!   re-running render function reuses one stable API instance.
//! - [`RenderScope`]: collects subscriptions for a component lifetime and
//!   releases them on drop.
//! - [`FormApiExt`]: `form.field(..)` / `form.subscribe_slice(..)`
//!   conveniences mirroring the render-prop surface.

pub mod render;
pub mod scope;

pub use render::{Field, FormApiExt, Subscribe};
pub use scope::{FieldScope, FormScope, RenderScope};
