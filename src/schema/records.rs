//! Record shapes persisted by the platform
//!
//! Records are plain data. Identifiers are assigned by the store and never
//! appear on these structs; timestamps are stamped by the store adapter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};
use super::kinds::RecordKind;

/// Name given to generated models when the request does not supply one
pub const DEFAULT_MODEL_NAME: &str = "Prompt Model";

/// Version stamped on freshly generated models
pub const DEFAULT_MODEL_VERSION: &str = "v1";

/// Placeholder artifacts attached to every generated model
pub const MOCK_ARTIFACTS: [&str; 2] = ["weights://mock/model.bin", "tokenizer://mock/vocab.json"];

/// Number of trailing model-id characters used in generated deployment names
const DEPLOYMENT_SUFFIX_LEN: usize = 6;

/// A record that can be written through the store adapter
pub trait Record: Serialize {
    /// Kind (and therefore collection) this record belongs to
    const KIND: RecordKind;

    /// Check field-level constraints before the record is persisted
    fn validate(&self) -> SchemaResult<()> {
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_version() -> String {
    DEFAULT_MODEL_VERSION.to_string()
}

// ==================
// Status enums
// ==================

/// Lifecycle of a model record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Queued,
    Training,
    #[default]
    Ready,
    Failed,
}

/// Lifecycle of a deployment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Provisioning,
    #[default]
    Active,
    Error,
    Stopped,
}

/// Lifecycle of a generation job
///
/// ```text
/// queued -> running -> completed
///    \         \
///     +-------> failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Queued, JobStatus::Running)
                | (JobStatus::Queued, JobStatus::Failed)
                | (JobStatus::Running, JobStatus::Completed)
                | (JobStatus::Running, JobStatus::Failed)
        )
    }
}

// ==================
// Example records
// ==================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Record for User {
    const KIND: RecordKind = RecordKind::User;

    fn validate(&self) -> SchemaResult<()> {
        match self.age {
            Some(age) if !(0..=120).contains(&age) => Err(SchemaError::out_of_range(
                "User",
                "age",
                format!("{} not in [0, 120]", age),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Record for Product {
    const KIND: RecordKind = RecordKind::Product;

    fn validate(&self) -> SchemaResult<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SchemaError::out_of_range(
                "Product",
                "price",
                format!("{} is not a non-negative amount", self.price),
            ));
        }
        Ok(())
    }
}

// ==================
// Platform records
// ==================

/// A generated (mock) model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    pub prompt: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub status: ModelStatus,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub artifacts: Vec<String>,
}

impl ModelSpec {
    /// Fabricate the model a generation request produces.
    ///
    /// The name comes from `parameters.name` when it is a string.
    pub fn generated(prompt: &str, parameters: Option<Map<String, Value>>) -> Self {
        let parameters = parameters.unwrap_or_default();
        let name = parameters
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_MODEL_NAME)
            .to_string();

        Self {
            name,
            prompt: prompt.to_string(),
            version: DEFAULT_MODEL_VERSION.to_string(),
            status: ModelStatus::Ready,
            parameters,
            artifacts: MOCK_ARTIFACTS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Record for ModelSpec {
    const KIND: RecordKind = RecordKind::ModelSpec;
}

/// A model exposed at a serving URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub model_id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: DeploymentStatus,
}

impl Deployment {
    /// Build an active deployment of `model_id` served under `public_base_url`
    pub fn for_model(model_id: &str, name: Option<String>, public_base_url: &str) -> Self {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| default_deployment_name(model_id));

        Self {
            model_id: model_id.to_string(),
            name,
            url: Some(format!("{}/serve/{}", public_base_url, model_id)),
            status: DeploymentStatus::Active,
        }
    }
}

/// `deployment-<last 6 chars of model_id>`
pub fn default_deployment_name(model_id: &str) -> String {
    let chars: Vec<char> = model_id.chars().collect();
    let start = chars.len().saturating_sub(DEPLOYMENT_SUFFIX_LEN);
    let suffix: String = chars[start..].iter().collect();
    format!("deployment-{}", suffix)
}

impl Record for Deployment {
    const KIND: RecordKind = RecordKind::Deployment;

    fn validate(&self) -> SchemaResult<()> {
        if self.model_id.trim().is_empty() {
            return Err(SchemaError::Empty {
                kind: "Deployment",
                field: "model_id",
            });
        }
        Ok(())
    }
}

/// A request to generate a model from a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationJob {
    pub prompt: String,
    pub status: JobStatus,
    #[serde(default)]
    pub model_id: Option<String>,
}

impl GenerationJob {
    /// A job that has been picked up and is producing its model
    pub fn running(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            status: JobStatus::Running,
            model_id: None,
        }
    }

    fn transition(&mut self, next: JobStatus) -> SchemaResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(SchemaError::InvalidTransition {
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Mark the job completed with the model it produced
    pub fn complete(&mut self, model_id: &str) -> SchemaResult<()> {
        self.transition(JobStatus::Completed)?;
        self.model_id = Some(model_id.to_string());
        Ok(())
    }

    pub fn fail(&mut self) -> SchemaResult<()> {
        self.transition(JobStatus::Failed)
    }
}

impl Record for GenerationJob {
    const KIND: RecordKind = RecordKind::GenerationJob;
}
