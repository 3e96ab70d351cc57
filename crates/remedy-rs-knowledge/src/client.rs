//! Reference lookup client over the public medical data sources.

use crate::chunk::{DEFAULT_MAX_CHUNK_SIZE, split_into_chunks};
use crate::error::KnowledgeError;
use log::{debug, warn};
use serde_json::Value;
use std::time::Duration;

/// Endpoints and limits for the reference sources.
#[derive(Debug, Clone)]
pub struct KnowledgeSettings {
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// OpenFDA drug label endpoint.
    pub openfda_url: String,
    /// RxNorm REST root.
    pub rxnorm_url: String,
    /// MedlinePlus Connect endpoint.
    pub medline_url: String,
    /// NICE guidance search endpoint.
    pub nice_url: String,
    /// health.gov guidelines search endpoint.
    pub health_gov_url: String,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            openfda_url: "https://api.fda.gov/drug/label.json".to_string(),
            rxnorm_url: "https://rxnav.nlm.nih.gov/REST".to_string(),
            medline_url: "https://connect.medlineplus.gov/service".to_string(),
            nice_url: "https://api.nice.org.uk/guidance".to_string(),
            health_gov_url: "https://health.gov/api/guidelines".to_string(),
        }
    }
}

/// Merged drug lookup across OpenFDA and RxNorm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrugInformation {
    /// OpenFDA label documents.
    pub fda_labels: Vec<Value>,
    /// RxNorm concept groups.
    pub rxnorm_groups: Vec<Value>,
}

impl DrugInformation {
    /// True when neither source returned anything.
    pub fn is_empty(&self) -> bool {
        self.fda_labels.is_empty() && self.rxnorm_groups.is_empty()
    }
}

/// Condition pages from MedlinePlus Connect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionDetails {
    /// Feed entries for the condition.
    pub entries: Vec<Value>,
}

/// Merged guideline search across NICE and health.gov.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuidelineSearch {
    /// NICE guidance results.
    pub nice: Vec<Value>,
    /// health.gov guideline results.
    pub health_gov: Vec<Value>,
}

/// HTTP client over the public reference sources.
///
/// Sources are treated as opaque read-only data: results come back as raw
/// JSON values for the caller to render, and an empty result is data, not an
/// error.
#[derive(Debug, Clone)]
pub struct KnowledgeClient {
    http: reqwest::Client,
    settings: KnowledgeSettings,
}

impl KnowledgeClient {
    /// Build a client with the given settings.
    pub fn new(settings: KnowledgeSettings) -> Result<Self, KnowledgeError> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    /// Drug information merged from OpenFDA labels and RxNorm concepts.
    ///
    /// Each source degrades independently: a failed source logs a warning and
    /// contributes nothing.
    pub async fn drug_information(&self, drug_name: &str) -> DrugInformation {
        let fda_labels = match self.openfda_labels(drug_name).await {
            Ok(labels) => labels,
            Err(err) => {
                warn!("openfda lookup failed (drug={drug_name}, error={err})");
                Vec::new()
            }
        };
        let rxnorm_groups = match self.rxnorm_groups(drug_name).await {
            Ok(groups) => groups,
            Err(err) => {
                warn!("rxnorm lookup failed (drug={drug_name}, error={err})");
                Vec::new()
            }
        };
        DrugInformation {
            fda_labels,
            rxnorm_groups,
        }
    }

    /// Condition pages from MedlinePlus Connect.
    pub async fn condition_details(&self, condition: &str) -> ConditionDetails {
        let entries = match self.medline_entries(condition).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!("medline lookup failed (condition={condition}, error={err})");
                Vec::new()
            }
        };
        ConditionDetails { entries }
    }

    /// Guideline search merged from NICE and health.gov.
    pub async fn treatment_guidelines(&self, condition: &str) -> GuidelineSearch {
        let nice = match self.nice_results(condition).await {
            Ok(results) => results,
            Err(err) => {
                warn!("nice lookup failed (condition={condition}, error={err})");
                Vec::new()
            }
        };
        let health_gov = match self.health_gov_results(condition).await {
            Ok(results) => results,
            Err(err) => {
                warn!("health.gov lookup failed (condition={condition}, error={err})");
                Vec::new()
            }
        };
        GuidelineSearch { nice, health_gov }
    }

    /// OpenFDA label documents whose indications mention the query.
    pub async fn openfda_labels(&self, query: &str) -> Result<Vec<Value>, KnowledgeError> {
        let mut labels = Vec::new();
        for piece in split_into_chunks(query, DEFAULT_MAX_CHUNK_SIZE) {
            let search = format!("indications_and_usage:{piece}");
            let body = self
                .fetch(&self.settings.openfda_url, &[("search", search.as_str()), ("limit", "5")])
                .await?;
            labels.extend(values_at(&body, &["results"]));
        }
        Ok(labels)
    }

    /// RxNorm concept groups for a drug name.
    pub async fn rxnorm_groups(&self, drug_name: &str) -> Result<Vec<Value>, KnowledgeError> {
        let url = format!("{}/drugs.json", self.settings.rxnorm_url);
        let mut groups = Vec::new();
        for piece in split_into_chunks(drug_name, DEFAULT_MAX_CHUNK_SIZE) {
            let body = self.fetch(&url, &[("name", piece.as_str())]).await?;
            groups.extend(values_at(&body, &["drugGroup", "conceptGroup"]));
        }
        Ok(groups)
    }

    /// MedlinePlus Connect feed entries for a condition name.
    pub async fn medline_entries(&self, condition: &str) -> Result<Vec<Value>, KnowledgeError> {
        let mut entries = Vec::new();
        for piece in split_into_chunks(condition, DEFAULT_MAX_CHUNK_SIZE) {
            let body = self
                .fetch(
                    &self.settings.medline_url,
                    &[
                        ("mainSearchCriteria.v.cs", "2.16.840.1.113883.6.177"),
                        ("mainSearchCriteria.v.dn", piece.as_str()),
                        ("knowledgeResponseType", "application/json"),
                    ],
                )
                .await?;
            entries.extend(values_at(&body, &["feed", "entry"]));
        }
        Ok(entries)
    }

    /// NICE guidance search results.
    pub async fn nice_results(&self, condition: &str) -> Result<Vec<Value>, KnowledgeError> {
        let mut results = Vec::new();
        for piece in split_into_chunks(condition, DEFAULT_MAX_CHUNK_SIZE) {
            let body = self
                .fetch(&self.settings.nice_url, &[("search", piece.as_str())])
                .await?;
            results.extend(values_at(&body, &["results"]));
        }
        Ok(results)
    }

    /// health.gov guideline search results.
    pub async fn health_gov_results(&self, condition: &str) -> Result<Vec<Value>, KnowledgeError> {
        let mut results = Vec::new();
        for piece in split_into_chunks(condition, DEFAULT_MAX_CHUNK_SIZE) {
            let body = self
                .fetch(&self.settings.health_gov_url, &[("query", piece.as_str())])
                .await?;
            results.extend(values_at(&body, &["results"]));
        }
        Ok(results)
    }

    /// One GET against a source, decoded as JSON.
    async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, KnowledgeError> {
        debug!("querying reference source (url={url})");
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(KnowledgeError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

/// Array at a nested path inside a JSON document, or empty when absent.
fn values_at(body: &Value, path: &[&str]) -> Vec<Value> {
    let mut cursor = body;
    for key in path {
        match cursor.get(key) {
            Some(next) => cursor = next,
            None => return Vec::new(),
        }
    }
    cursor.as_array().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{KnowledgeClient, KnowledgeSettings, values_at};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn values_at_walks_nested_documents() {
        let body = json!({
            "drugGroup": {
                "conceptGroup": [{"tty": "SBD"}, {"tty": "SCD"}]
            }
        });
        let values = values_at(&body, &["drugGroup", "conceptGroup"]);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], json!({"tty": "SBD"}));
    }

    #[test]
    fn values_at_missing_path_is_empty() {
        let body = json!({"results": [1, 2, 3]});
        assert!(values_at(&body, &["feed", "entry"]).is_empty());
        assert!(values_at(&body, &["results", "nested"]).is_empty());
    }

    #[test]
    fn default_settings_point_at_public_sources() {
        let settings = KnowledgeSettings::default();
        assert!(settings.openfda_url.starts_with("https://api.fda.gov"));
        assert!(settings.rxnorm_url.starts_with("https://rxnav.nlm.nih.gov"));
    }

    #[tokio::test]
    async fn unreachable_sources_degrade_to_empty_results() {
        let settings = KnowledgeSettings {
            openfda_url: "http://127.0.0.1:1/label.json".to_string(),
            rxnorm_url: "http://127.0.0.1:1/REST".to_string(),
            request_timeout: std::time::Duration::from_millis(200),
            ..KnowledgeSettings::default()
        };
        let client = KnowledgeClient::new(settings).expect("client");
        let info = client.drug_information("oseltamivir").await;
        assert!(info.is_empty());
    }
}
