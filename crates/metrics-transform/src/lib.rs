//! Transformation and validation pipeline.
//!
//! Applies an accepted mapping to the raw rows: coerces each cell to
//! its field's expected type using the format observed during
//! inference, validates the result, and computes derived metrics where
//! their inputs are present. Nothing here aborts an import; every
//! problem lands on the row it belongs to.

pub mod coerce;
pub mod pipeline;

pub use coerce::{CoerceError, coerce};
pub use pipeline::{TransformOutcome, transform_rows};
