//! # pictor-core
//!
//! Shared types for pictor.
//!
//! This crate provides:
//! - [`Error`] / [`Result`] — the error taxonomy used by every dataset
//! - [`Shape`] — dimension sizes of a dense array
//! - [`Array`] — owned channel-first `f32` buffer produced by image decoding

pub mod array;
pub mod error;
pub mod shape;

pub use array::Array;
pub use error::{Error, Result};
pub use shape::Shape;
