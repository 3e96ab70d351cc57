//! Read-only lookups against public medical reference APIs.
//!
//! Covers drug labels (OpenFDA), drug concepts (RxNorm), condition pages
//! (MedlinePlus Connect), and clinical guideline search (NICE, health.gov).
//! All sources are best-effort: an unreachable source degrades to an empty
//! result set rather than failing the whole lookup.

pub mod chunk;
pub mod client;
pub mod error;

/// Sentence-aware query chunking.
pub use chunk::split_into_chunks;
/// Reference lookup client and result types.
pub use client::{
    ConditionDetails, DrugInformation, GuidelineSearch, KnowledgeClient, KnowledgeSettings,
};
/// Knowledge lookup error type.
pub use error::KnowledgeError;
