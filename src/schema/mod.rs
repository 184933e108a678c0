//! Record schemas
//!
//! The five record kinds the platform stores, their field constraints,
//! and the fixed kind → collection table.

mod errors;
mod kinds;
mod records;

pub use errors::{SchemaError, SchemaResult};
pub use kinds::RecordKind;
pub use records::{
    default_deployment_name, Deployment, DeploymentStatus, GenerationJob, JobStatus, ModelSpec,
    ModelStatus, Product, Record, User, DEFAULT_MODEL_NAME, DEFAULT_MODEL_VERSION, MOCK_ARTIFACTS,
};
