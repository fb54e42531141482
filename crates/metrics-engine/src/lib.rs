//! Import engine: wires inference, matching (or a template hit),
//! transformation, and the confidence gate into one pure, synchronous
//! computation. The registry is the only shared state and is read-only,
//! so any number of imports may run concurrently without locking.

pub mod confidence;
pub mod importer;

pub use confidence::{Confidence, LOW_CONFIDENCE_FIELD, REVIEW_THRESHOLD, UNRESOLVED_CAP, aggregate};
pub use importer::Importer;
