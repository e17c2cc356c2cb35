#![forbid(unsafe_code)]

//! Formant public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub mod prelude {
    #[cfg(feature = "bind")]
    pub use formant_bind as bind;
    pub use formant_form as form;
    pub use formant_path as path;
    pub use formant_store as store;

    #[cfg(feature = "bind")]
    pub use formant_bind::{Field, FieldScope, FormApiExt, FormScope, RenderScope, Subscribe};
    pub use formant_form::{
        FieldApi, FieldOptions, FieldState, FormApi, FormData, FormError, FormOptions, FormState,
        SubmitArgs, SubmitError,
    };
    pub use formant_path::FieldPath;
    pub use formant_store::{Store, Subscription};
}
