//! CLI library components for the metrics import engine.

pub mod logging;
