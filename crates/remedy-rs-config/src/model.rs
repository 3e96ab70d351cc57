//! Configuration schema for Remedy.

use serde::{Deserialize, Serialize};

/// Root config for the Remedy assistant.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemedyConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl RemedyConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> RemedyConfigBuilder {
        RemedyConfigBuilder::new()
    }
}

/// Builder for assembling a `RemedyConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct RemedyConfigBuilder {
    config: RemedyConfig,
}

impl RemedyConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: RemedyConfig::default(),
        }
    }

    /// Replace the model configuration.
    pub fn model(mut self, model: ModelConfig) -> Self {
        self.config.model = model;
        self
    }

    /// Replace the context configuration.
    pub fn context(mut self, context: ContextConfig) -> Self {
        self.config.context = context;
        self
    }

    /// Replace the knowledge-source configuration.
    pub fn knowledge(mut self, knowledge: KnowledgeConfig) -> Self {
        self.config.knowledge = knowledge;
        self
    }

    /// Finalize and return the built `RemedyConfig`.
    pub fn build(self) -> RemedyConfig {
        self.config
    }
}

/// Hosted model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name to request.
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Maximum tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model_name() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    1500
}

/// Conversation context configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Turns included in a context window by default.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Where checkpoints are written.
    #[serde(default = "default_checkpoint_path")]
    pub checkpoint_path: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            checkpoint_path: default_checkpoint_path(),
        }
    }
}

fn default_window_size() -> usize {
    10
}

fn default_checkpoint_path() -> String {
    ".remedy/context.json".to_string()
}

/// Reference source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// OpenFDA drug label endpoint.
    #[serde(default = "default_openfda_url")]
    pub openfda_url: String,
    /// RxNorm REST root.
    #[serde(default = "default_rxnorm_url")]
    pub rxnorm_url: String,
    /// MedlinePlus Connect endpoint.
    #[serde(default = "default_medline_url")]
    pub medline_url: String,
    /// NICE guidance search endpoint.
    #[serde(default = "default_nice_url")]
    pub nice_url: String,
    /// health.gov guidelines search endpoint.
    #[serde(default = "default_health_gov_url")]
    pub health_gov_url: String,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            openfda_url: default_openfda_url(),
            rxnorm_url: default_rxnorm_url(),
            medline_url: default_medline_url(),
            nice_url: default_nice_url(),
            health_gov_url: default_health_gov_url(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_openfda_url() -> String {
    "https://api.fda.gov/drug/label.json".to_string()
}

fn default_rxnorm_url() -> String {
    "https://rxnav.nlm.nih.gov/REST".to_string()
}

fn default_medline_url() -> String {
    "https://connect.medlineplus.gov/service".to_string()
}

fn default_nice_url() -> String {
    "https://api.nice.org.uk/guidance".to_string()
}

fn default_health_gov_url() -> String {
    "https://health.gov/api/guidelines".to_string()
}
