#![forbid(unsafe_code)]

//! Field addressing for Formant.
//!
//! A [`FieldPath`] is the parsed form of a path string such as
//! `user.addresses[0].street`: dotted keys with optional bracketed array
//! indices. Paths are the sole mechanism for addressing a location inside a
//! form's value tree — parsing is fallible, resolution treats missing or
//! mismatched locations as absence, and writes fail fast when the path does
//! not lead to a writable slot.

pub mod error;
pub mod path;

pub use error::PathError;
pub use path::{FieldPath, Segment};
