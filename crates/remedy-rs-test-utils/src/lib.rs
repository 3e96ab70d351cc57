//! Test doubles shared across the Remedy crates.

pub mod model;

pub use model::{FailingModel, FixedModel, RecordingModel};
