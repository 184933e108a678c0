//! Record kinds and their storage collections
//!
//! The kind → collection mapping is a fixed table; nothing is derived
//! from type names at runtime.

use std::fmt;

use serde::Serialize;

/// One of the five record shapes the platform persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    User,
    Product,
    ModelSpec,
    Deployment,
    GenerationJob,
}

/// Every kind paired with its collection name, in schema listing order
const COLLECTIONS: [(RecordKind, &str); 5] = [
    (RecordKind::User, "user"),
    (RecordKind::Product, "product"),
    (RecordKind::ModelSpec, "modelspec"),
    (RecordKind::Deployment, "deployment"),
    (RecordKind::GenerationJob, "generationjob"),
];

impl RecordKind {
    /// All kinds in listing order
    pub const ALL: [RecordKind; 5] = [
        RecordKind::User,
        RecordKind::Product,
        RecordKind::ModelSpec,
        RecordKind::Deployment,
        RecordKind::GenerationJob,
    ];

    /// Storage collection holding records of this kind
    pub fn collection(&self) -> &'static str {
        COLLECTIONS
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }

    /// Human-facing kind name
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::User => "User",
            RecordKind::Product => "Product",
            RecordKind::ModelSpec => "ModelSpec",
            RecordKind::Deployment => "Deployment",
            RecordKind::GenerationJob => "GenerationJob",
        }
    }

    /// Collection names for every kind, as served by `GET /schema`
    pub fn collection_names() -> Vec<&'static str> {
        COLLECTIONS.iter().map(|(_, name)| *name).collect()
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
