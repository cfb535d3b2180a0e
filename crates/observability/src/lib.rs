//! `storelens-observability` — process-wide logging setup.

pub mod tracing;

pub use crate::tracing::init;
