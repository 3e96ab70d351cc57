//! Symptom terminology lexicon and free-text normalization.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized view of a free-text symptom description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomReport {
    /// The text as the user entered it.
    pub original_input: String,
    /// Matched canonical symptom terms, deduplicated and sorted.
    pub symptoms: Vec<String>,
}

impl SymptomReport {
    /// True when no known symptom matched the input.
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}

/// Mapping from canonical symptom terms to their colloquial variations.
#[derive(Debug, Clone)]
pub struct SymptomLexicon {
    entries: BTreeMap<String, Vec<String>>,
}

impl SymptomLexicon {
    /// Normalize free text into canonical symptom terms.
    ///
    /// Matching is case-insensitive substring containment over every known
    /// variation; each canonical term is reported at most once.
    pub fn normalize(&self, text: &str) -> SymptomReport {
        let lowered = text.to_lowercase();
        let symptoms = self
            .entries
            .iter()
            .filter(|(_, variations)| {
                variations
                    .iter()
                    .any(|variation| lowered.contains(variation.as_str()))
            })
            .map(|(term, _)| term.clone())
            .collect::<Vec<_>>();
        debug!(
            "normalized symptoms (input_len={}, matched={})",
            text.len(),
            symptoms.len()
        );
        SymptomReport {
            original_input: text.to_string(),
            symptoms,
        }
    }

    /// Known variations for a canonical term.
    pub fn variations(&self, term: &str) -> &[String] {
        self.entries
            .get(term)
            .map(|variations| variations.as_slice())
            .unwrap_or(&[])
    }

    /// Canonical terms known to this lexicon.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of canonical terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the lexicon has no terms.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymptomLexicon {
    /// Built-in terminology covering common presenting complaints.
    fn default() -> Self {
        let table: &[(&str, &[&str])] = &[
            (
                "fever",
                &["fever", "high temperature", "pyrexia", "febrile", "chills", "running a temperature", "burning up"],
            ),
            (
                "headache",
                &["headache", "head pain", "cephalgia", "migraine", "throbbing head", "pressure in head"],
            ),
            (
                "cough",
                &["cough", "coughing", "persistent cough", "dry cough", "wet cough", "hacking cough"],
            ),
            (
                "fatigue",
                &["tired", "fatigue", "exhaustion", "weakness", "lethargy", "low energy", "feeling drained", "worn out"],
            ),
            (
                "sore_throat",
                &["sore throat", "throat pain", "scratchy throat", "throat irritation", "difficulty swallowing"],
            ),
            (
                "runny_nose",
                &["runny nose", "nasal congestion", "stuffy nose", "blocked nose"],
            ),
            (
                "body_aches",
                &["body aches", "muscle pain", "joint pain", "aches", "soreness", "muscle ache"],
            ),
            (
                "nausea",
                &["nausea", "queasy", "sick to stomach", "vomiting", "throwing up", "upset stomach"],
            ),
            (
                "dizziness",
                &["dizzy", "lightheaded", "vertigo", "unsteady", "woozy", "spinning sensation"],
            ),
            (
                "chest_pain",
                &["chest pain", "chest discomfort", "chest tightness", "pressure in chest"],
            ),
            (
                "shortness_of_breath",
                &["shortness of breath", "difficulty breathing", "breathlessness", "dyspnea", "can't catch breath"],
            ),
            (
                "abdominal_pain",
                &["stomach pain", "abdominal pain", "belly ache", "stomach cramps", "gut pain"],
            ),
        ];
        let entries = table
            .iter()
            .map(|(term, variations)| {
                (
                    term.to_string(),
                    variations.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }
}
