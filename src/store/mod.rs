//! # Document Store
//!
//! Persistence for the platform's records.
//!
//! - [`DocumentStore`]: the database seam (MongoDB or in-memory)
//! - [`StoreAdapter`]: kind-aware facade used by the HTTP handlers
//! - [`to_public`]: stored document → public JSON (`_id` → `id`)

mod adapter;
mod config;
mod document;
mod errors;
mod memory;
mod mongo;
mod public;

pub use adapter::StoreAdapter;
pub use config::{StoreConfig, DATABASE_NAME_ENV, DATABASE_URL_ENV};
pub use document::DocumentStore;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use public::to_public;
