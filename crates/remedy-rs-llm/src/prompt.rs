//! Prompt assembly from context windows and clinical findings.

use remedy_rs_clinical::{Differential, GuidelineEntry, SymptomReport};
use remedy_rs_context::ContextWindow;
use std::fmt::Write;

/// Flatten a context window into a transcript preamble for the model.
///
/// Turns come out oldest first, followed by the current state snapshot so the
/// model sees session facts even when no history was requested.
pub fn render_window(window: &ContextWindow) -> String {
    let mut rendered = String::new();
    if !window.turns.is_empty() {
        rendered.push_str("Conversation so far:\n");
        for turn in &window.turns {
            let _ = writeln!(rendered, "{}: {}", turn.role.as_str(), turn.content);
        }
    }
    if !window.state.is_empty() {
        rendered.push_str("Session state:\n");
        for (key, value) in &window.state {
            let _ = writeln!(rendered, "- {key}: {value}");
        }
    }
    rendered
}

/// Assemble the educational-response prompt for an analyzed case.
pub fn build_case_prompt(
    report: &SymptomReport,
    differential: &Differential,
    guidelines: Option<&GuidelineEntry>,
) -> String {
    let conditions = differential
        .conditions
        .iter()
        .map(|candidate| candidate.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let guidance = match guidelines {
        Some(entry) => format!(
            "First-line treatment: {}. Medications: {}. Red flags: {}. Follow up: {}. Typical duration: {}.",
            entry.first_line_treatment.join(", "),
            entry.medications.join(", "),
            entry.red_flags.join(", "),
            entry.follow_up,
            entry.duration
        ),
        None => "No specific guidelines found; recommend consulting a healthcare provider.".to_string(),
    };

    format!(
        "Based on the following medical analysis, provide educational information:\n\n\
         Patient Symptoms: {}\n\
         Normalized Symptoms: {}\n\
         Potential Conditions: {}\n\
         Urgency Level: {}\n\
         Treatment Guidelines: {}\n\n\
         Please provide a clear, educational response that includes:\n\
         1. A summary of what the symptoms might indicate\n\
         2. General self-care recommendations\n\
         3. Clear guidance on when to seek professional medical care\n\
         4. Important medical disclaimers\n\n\
         Format your response in a helpful, easy-to-understand manner while \
         emphasizing that this is educational information only.",
        report.original_input,
        report.symptoms.join(", "),
        conditions,
        differential.urgency.as_str(),
        guidance
    )
}
