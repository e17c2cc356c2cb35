#![forbid(unsafe_code)]

use formant_path::{FieldPath, PathError};
use thiserror::Error;

/// Error surfaced by a failed submission.
///
/// `handle_submit` passes the external callback's error through unchanged,
/// so this is whatever the host's `on_submit` produced. Single-threaded
/// model, no `Send` bound.
pub type SubmitError = Box<dyn std::error::Error>;

/// Errors from the form engine itself (path addressing and value shape).
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Path(#[from] PathError),

    /// Strict lookups only: the path did not resolve to any value.
    #[error("no value found at path `{path}`")]
    FieldValueNotFound { path: FieldPath },

    /// The written value left the tree in a shape the form data type no
    /// longer deserializes from.
    #[error("value at `{path}` does not fit the form data shape: {source}")]
    Shape {
        path: FieldPath,
        #[source]
        source: serde_json::Error,
    },

    #[error("form data could not be serialized: {0}")]
    Codec(#[from] serde_json::Error),
}
