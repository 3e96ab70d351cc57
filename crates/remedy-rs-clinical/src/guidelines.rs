//! Local treatment guideline library for common conditions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Treatment guidance for one condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuidelineEntry {
    /// First-line treatment steps.
    pub first_line_treatment: Vec<String>,
    /// Medication options.
    pub medications: Vec<String>,
    /// Findings that warrant escalation.
    pub red_flags: Vec<String>,
    /// When to follow up with a provider.
    pub follow_up: String,
    /// Typical course duration.
    pub duration: String,
}

/// Condition-keyed guideline lookup.
#[derive(Debug, Clone)]
pub struct GuidelineLibrary {
    entries: BTreeMap<String, GuidelineEntry>,
}

impl GuidelineLibrary {
    /// Guidance for a condition, if the library covers it.
    pub fn get(&self, condition: &str) -> Option<&GuidelineEntry> {
        self.entries.get(condition)
    }

    /// Conditions covered by this library.
    pub fn conditions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for GuidelineLibrary {
    /// Built-in guidance for the conditions the differential table produces
    /// most often.
    fn default() -> Self {
        fn entry(
            first_line: &[&str],
            medications: &[&str],
            red_flags: &[&str],
            follow_up: &str,
            duration: &str,
        ) -> GuidelineEntry {
            GuidelineEntry {
                first_line_treatment: first_line.iter().map(|s| s.to_string()).collect(),
                medications: medications.iter().map(|s| s.to_string()).collect(),
                red_flags: red_flags.iter().map(|s| s.to_string()).collect(),
                follow_up: follow_up.to_string(),
                duration: duration.to_string(),
            }
        }

        let mut entries = BTreeMap::new();
        entries.insert(
            "Upper Respiratory Infection".to_string(),
            entry(
                &["Rest", "Hydration", "Supportive care"],
                &[
                    "Acetaminophen for fever",
                    "Throat lozenges",
                    "Decongestants if needed",
                ],
                &[
                    "High fever >101.5F for >3 days",
                    "Difficulty breathing",
                    "Severe throat pain",
                ],
                "If symptoms worsen or persist beyond 7-10 days",
                "7-10 days typically",
            ),
        );
        entries.insert(
            "Influenza".to_string(),
            entry(
                &["Rest", "Hydration", "Antiviral medications if within 48 hours"],
                &["Oseltamivir (Tamiflu)", "Acetaminophen/Ibuprofen for fever"],
                &["Difficulty breathing", "Chest pain", "Severe dehydration"],
                "Monitor closely, seek care if breathing difficulties",
                "7-14 days typically",
            ),
        );
        entries.insert(
            "COVID-19".to_string(),
            entry(
                &["Isolation", "Rest", "Hydration", "Monitor oxygen levels"],
                &["Acetaminophen for fever", "Consider Paxlovid if high risk"],
                &[
                    "Difficulty breathing",
                    "Chest pain",
                    "Confusion",
                    "Bluish lips",
                ],
                "Isolate for 5-10 days, seek immediate care for severe symptoms",
                "5-14 days typically",
            ),
        );
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::GuidelineLibrary;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_condition_returns_guidance() {
        let library = GuidelineLibrary::default();
        let entry = library.get("Influenza").expect("entry");
        assert!(entry.medications.iter().any(|m| m.contains("Oseltamivir")));
        assert_eq!(entry.duration, "7-14 days typically");
    }

    #[test]
    fn unknown_condition_is_absent() {
        let library = GuidelineLibrary::default();
        assert!(library.get("Scurvy").is_none());
    }

    #[test]
    fn library_covers_differential_outputs() {
        let library = GuidelineLibrary::default();
        let covered = library.conditions().collect::<Vec<_>>();
        assert!(covered.contains(&"Upper Respiratory Infection"));
        assert!(covered.contains(&"COVID-19"));
    }
}
