//! Case analysis pipeline driving the context manager and collaborators.

use anyhow::{Context, Result};
use log::{debug, info};
use remedy_rs_clinical::{ConditionTable, Differential, GuidelineLibrary, SymptomLexicon, SymptomReport};
use remedy_rs_context::{ContextManager, ContextValue, Role};
use remedy_rs_knowledge::{ConditionDetails, DrugInformation, GuidelineSearch, KnowledgeClient};
use remedy_rs_llm::{CompletionRequest, ModelClient, prompt};
use std::sync::Arc;

/// Structured result of one analyzed case.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    /// Normalized symptoms.
    pub report: SymptomReport,
    /// Ranked candidate conditions.
    pub differential: Differential,
    /// Model-generated educational response.
    pub response: String,
}

/// The assistant loop's collaborator bundle around one conversation context.
///
/// The assistant decides what gets recorded: user input and model replies
/// become turns, analysis steps become tool usages, and the latest findings
/// become state entries. The context manager itself infers none of this.
pub struct Assistant {
    context: ContextManager,
    lexicon: SymptomLexicon,
    conditions: ConditionTable,
    guidelines: GuidelineLibrary,
    knowledge: KnowledgeClient,
    model: Arc<dyn ModelClient>,
    window_size: usize,
    max_tokens: u32,
}

impl Assistant {
    /// Assemble an assistant around an existing context.
    pub fn new(
        context: ContextManager,
        knowledge: KnowledgeClient,
        model: Arc<dyn ModelClient>,
        window_size: usize,
        max_tokens: u32,
    ) -> Self {
        Self {
            context,
            lexicon: SymptomLexicon::default(),
            conditions: ConditionTable::default(),
            guidelines: GuidelineLibrary::default(),
            knowledge,
            model,
            window_size,
            max_tokens,
        }
    }

    /// The conversation context this assistant records into.
    pub fn context(&self) -> &ContextManager {
        &self.context
    }

    /// Analyze a free-text symptom description end to end.
    ///
    /// Records the user turn first, then each analysis step as a tool usage,
    /// the resulting urgency as state, and finally the model reply as an
    /// assistant turn. A failed model call leaves the user turn and analysis
    /// bookkeeping in place; only the assistant turn is missing.
    pub async fn handle_case(&self, input: &str) -> Result<CaseOutcome> {
        self.context.record_interaction(Role::User, input, None);

        let report = self.lexicon.normalize(input);
        self.context
            .record_tool_usage("symptom_checker")
            .context("record symptom_checker usage")?;
        self.context
            .record_state_change(
                "last_symptoms",
                ContextValue::from(report.symptoms.clone()),
            )
            .context("record symptoms")?;

        let differential = self.conditions.differential(&report.symptoms);
        self.context
            .record_tool_usage("differential_diagnosis")
            .context("record differential_diagnosis usage")?;
        self.context
            .record_state_change("urgency", differential.urgency.as_str())
            .context("record urgency")?;

        let guidance = match differential.primary_condition() {
            Some(condition) => {
                self.context
                    .record_tool_usage("treatment_guidelines")
                    .context("record treatment_guidelines usage")?;
                self.guidelines.get(condition)
            }
            None => None,
        };

        let window = self.context.context_window(Some(self.window_size));
        let preamble = prompt::render_window(&window);
        let case_prompt = prompt::build_case_prompt(&report, &differential, guidance);
        let full_prompt = if preamble.is_empty() {
            case_prompt
        } else {
            format!("{preamble}\n{case_prompt}")
        };
        debug!(
            "dispatching case to model (symptoms={}, prompt_len={})",
            report.symptoms.len(),
            full_prompt.len()
        );

        let completion = self
            .model
            .complete(CompletionRequest::new(full_prompt).with_max_tokens(self.max_tokens))
            .await?;
        self.context
            .record_interaction(Role::Assistant, completion.text.clone(), None);
        info!(
            "case analyzed (symptoms={}, urgency={})",
            report.symptoms.len(),
            differential.urgency.as_str()
        );

        Ok(CaseOutcome {
            report,
            differential,
            response: completion.text,
        })
    }

    /// Look up drug information, recording the tool usage.
    pub async fn drug_lookup(&self, drug_name: &str) -> Result<DrugInformation> {
        self.context
            .record_tool_usage("drug_lookup")
            .context("record drug_lookup usage")?;
        Ok(self.knowledge.drug_information(drug_name).await)
    }

    /// Look up condition pages, recording the tool usage.
    pub async fn condition_lookup(&self, condition: &str) -> Result<ConditionDetails> {
        self.context
            .record_tool_usage("condition_lookup")
            .context("record condition_lookup usage")?;
        Ok(self.knowledge.condition_details(condition).await)
    }

    /// Search published guidelines, recording the tool usage.
    pub async fn guideline_search(&self, condition: &str) -> Result<GuidelineSearch> {
        self.context
            .record_tool_usage("guideline_search")
            .context("record guideline_search usage")?;
        Ok(self.knowledge.treatment_guidelines(condition).await)
    }
}

#[cfg(test)]
mod tests {
    use super::Assistant;
    use pretty_assertions::assert_eq;
    use remedy_rs_context::{ContextManager, ContextValue};
    use remedy_rs_knowledge::{KnowledgeClient, KnowledgeSettings};
    use remedy_rs_test_utils::{FailingModel, FixedModel, RecordingModel};
    use std::sync::Arc;

    fn assistant_with(model: Arc<dyn remedy_rs_llm::ModelClient>) -> Assistant {
        let knowledge = KnowledgeClient::new(KnowledgeSettings::default()).expect("client");
        Assistant::new(ContextManager::new(), knowledge, model, 10, 1500)
    }

    #[tokio::test]
    async fn case_records_turns_tools_and_state() {
        let assistant = assistant_with(Arc::new(FixedModel::new("rest and fluids")));
        let outcome = assistant
            .handle_case("I have a fever and a bad cough")
            .await
            .expect("case");

        assert_eq!(outcome.report.symptoms, vec!["cough", "fever"]);
        assert_eq!(
            outcome.differential.primary_condition(),
            Some("Upper Respiratory Infection")
        );
        assert_eq!(outcome.response, "rest and fluids");

        let window = assistant.context().context_window(Some(10));
        assert_eq!(window.turns.len(), 2);
        assert_eq!(window.turns[0].content, "I have a fever and a bad cough");
        assert_eq!(window.turns[1].content, "rest and fluids");
        assert_eq!(window.tool_usage.get("symptom_checker").expect("tool").count, 1);
        assert_eq!(
            assistant.context().state("urgency"),
            Some(ContextValue::from("moderate"))
        );
    }

    #[tokio::test]
    async fn model_sees_prior_turns_in_the_prompt() {
        let model = Arc::new(RecordingModel::new("ok"));
        let assistant = assistant_with(model.clone());

        assistant.handle_case("fever and cough").await.expect("first");
        assistant
            .handle_case("now also feeling very tired")
            .await
            .expect("second");

        let prompts = model.seen_prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("user: fever and cough"));
        assert!(prompts[1].contains("assistant: ok"));
        assert!(prompts[1].contains("- urgency:"));
    }

    #[tokio::test]
    async fn failed_model_call_keeps_user_turn_only() {
        let assistant = assistant_with(Arc::new(FailingModel::new("quota exceeded")));
        let err = assistant.handle_case("fever and cough").await.expect_err("model");
        assert!(err.to_string().contains("quota exceeded"));

        let window = assistant.context().context_window(Some(10));
        assert_eq!(window.turns.len(), 1);
        assert_eq!(window.turns[0].content, "fever and cough");
        assert_eq!(
            window.tool_usage.get("differential_diagnosis").expect("tool").count,
            1
        );
    }

    #[tokio::test]
    async fn repeated_cases_accumulate_tool_counts() {
        let assistant = assistant_with(Arc::new(FixedModel::new("ok")));
        assistant.handle_case("fever and cough").await.expect("first");
        assistant.handle_case("fever and headache").await.expect("second");

        let window = assistant.context().context_window(Some(10));
        assert_eq!(window.tool_usage.get("symptom_checker").expect("tool").count, 2);
        assert_eq!(
            assistant.context().state("last_symptoms"),
            Some(ContextValue::from(vec!["fever", "headache"]))
        );
    }
}
