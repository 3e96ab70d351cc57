//! Stateless clinical analysis: symptom normalization, differential
//! diagnosis heuristics, and local treatment guidelines.
//!
//! Everything here is a pure transformation of free text into structured
//! findings; no I/O and no session state.

pub mod diagnosis;
pub mod guidelines;
pub mod lexicon;

/// Differential diagnosis heuristics.
pub use diagnosis::{CandidateCondition, ConditionTable, Differential, Urgency};
/// Local treatment guideline library.
pub use guidelines::{GuidelineEntry, GuidelineLibrary};
/// Symptom terminology lexicon and normalization.
pub use lexicon::{SymptomLexicon, SymptomReport};
