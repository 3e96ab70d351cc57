//! Differential diagnosis heuristics over normalized symptoms.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How promptly a presentation warrants professional attention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Self-care is usually sufficient.
    Low,
    /// Worth monitoring; seek care if symptoms worsen.
    Moderate,
    /// Prompt professional evaluation advised.
    High,
    /// No basis for an urgency estimate.
    Unknown,
}

impl Urgency {
    /// Return the urgency as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Moderate => "moderate",
            Urgency::High => "high",
            Urgency::Unknown => "unknown",
        }
    }
}

/// One candidate condition with its estimated likelihood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateCondition {
    /// Condition name.
    pub name: String,
    /// Relative likelihood in [0, 1].
    pub likelihood: f64,
}

/// Ranked candidate conditions for a symptom set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Differential {
    /// Candidates, most likely first.
    pub conditions: Vec<CandidateCondition>,
    /// Urgency estimate for the presentation.
    pub urgency: Urgency,
}

impl Differential {
    /// The most likely condition, if any candidate was produced.
    pub fn primary_condition(&self) -> Option<&str> {
        self.conditions.first().map(|candidate| candidate.name.as_str())
    }

    /// Fallback differential when no rule overlaps the symptoms.
    fn fallback() -> Self {
        Self {
            conditions: vec![CandidateCondition {
                name: "Consult healthcare provider for evaluation".to_string(),
                likelihood: 1.0,
            }],
            urgency: Urgency::Unknown,
        }
    }
}

/// One row of the condition table: a symptom combination and its outcome.
#[derive(Debug, Clone)]
struct ConditionRule {
    symptoms: Vec<String>,
    conditions: Vec<CandidateCondition>,
    urgency: Urgency,
}

/// Symptom-combination table scored by overlap with the presented symptoms.
#[derive(Debug, Clone)]
pub struct ConditionTable {
    rules: Vec<ConditionRule>,
}

impl ConditionTable {
    /// Rank conditions for the given canonical symptoms.
    ///
    /// Scores every rule by Jaccard overlap (intersection over union) between
    /// its symptom combination and the presented set, and returns the
    /// best-scoring rule's outcome. Empty or unmatched symptom sets yield the
    /// consult-a-provider fallback.
    pub fn differential(&self, symptoms: &[String]) -> Differential {
        let presented = symptoms.iter().cloned().collect::<BTreeSet<_>>();
        let mut best: Option<(f64, &ConditionRule)> = None;
        for rule in &self.rules {
            let combo = rule.symptoms.iter().cloned().collect::<BTreeSet<_>>();
            let intersection = presented.intersection(&combo).count();
            let union = presented.union(&combo).count();
            if union == 0 {
                continue;
            }
            let score = intersection as f64 / union as f64;
            if score > best.map(|(s, _)| s).unwrap_or(0.0) {
                best = Some((score, rule));
            }
        }
        match best {
            Some((score, rule)) => {
                debug!(
                    "differential matched (symptoms={}, score={:.2}, primary={})",
                    symptoms.len(),
                    score,
                    rule.conditions
                        .first()
                        .map(|c| c.name.as_str())
                        .unwrap_or("none")
                );
                Differential {
                    conditions: rule.conditions.clone(),
                    urgency: rule.urgency,
                }
            }
            None => {
                debug!("differential fallback (symptoms={})", symptoms.len());
                Differential::fallback()
            }
        }
    }
}

impl Default for ConditionTable {
    /// Built-in combination table for common respiratory presentations.
    fn default() -> Self {
        fn rule(
            symptoms: &[&str],
            conditions: &[(&str, f64)],
            urgency: Urgency,
        ) -> ConditionRule {
            ConditionRule {
                symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
                conditions: conditions
                    .iter()
                    .map(|(name, likelihood)| CandidateCondition {
                        name: name.to_string(),
                        likelihood: *likelihood,
                    })
                    .collect(),
                urgency,
            }
        }

        Self {
            rules: vec![
                rule(
                    &["fever", "cough"],
                    &[
                        ("Upper Respiratory Infection", 0.6),
                        ("Pneumonia", 0.2),
                        ("Bronchitis", 0.2),
                    ],
                    Urgency::Moderate,
                ),
                rule(
                    &["fever", "headache"],
                    &[
                        ("Viral Infection", 0.7),
                        ("Sinusitis", 0.2),
                        ("Meningitis", 0.1),
                    ],
                    Urgency::Moderate,
                ),
                rule(
                    &["fever", "cough", "fatigue"],
                    &[
                        ("Influenza", 0.4),
                        ("COVID-19", 0.3),
                        ("Pneumonia", 0.2),
                        ("Bronchitis", 0.1),
                    ],
                    Urgency::Moderate,
                ),
                rule(
                    &["cough", "fatigue"],
                    &[
                        ("Upper Respiratory Infection", 0.5),
                        ("Bronchitis", 0.3),
                        ("Allergies", 0.2),
                    ],
                    Urgency::Low,
                ),
            ],
        }
    }
}
