//! Profile extraction via the generative-language service.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::extraction::prompts::{CANDIDATE_PROMPT_TEMPLATE, JOB_PROMPT_TEMPLATE};
use crate::extraction::ProfileExtractor;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::{CandidateProfile, JobProfile};

/// Sends one fixed prompt per document and validates the reply against the profile shape.
#[derive(Clone)]
pub struct LlmProfileExtractor {
    llm: LlmClient,
}

impl LlmProfileExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    async fn extract<T: DeserializeOwned>(&self, prompt: &str, what: &str) -> Result<T, AppError> {
        let value: Value = self
            .llm
            .call_json(prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::StructuredExtraction(format!("{what}: {e}")))?;
        conform(value, what)
    }
}

#[async_trait]
impl ProfileExtractor for LlmProfileExtractor {
    async fn extract_candidate(&self, cv_text: &str) -> Result<CandidateProfile, AppError> {
        let prompt = CANDIDATE_PROMPT_TEMPLATE.replace("{cv_text}", cv_text);
        self.extract(&prompt, "CV").await
    }

    async fn extract_job(&self, job_text: &str) -> Result<JobProfile, AppError> {
        let prompt = JOB_PROMPT_TEMPLATE.replace("{job_text}", job_text);
        self.extract(&prompt, "job description").await
    }
}

/// Validates that `value` is a JSON object shaped like `T`. Absent fields default;
/// wrongly-typed fields and non-object values are rejected.
fn conform<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, AppError> {
    if !value.is_object() {
        return Err(AppError::StructuredExtraction(format!(
            "{what}: expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| AppError::StructuredExtraction(format!("{what}: {e}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
