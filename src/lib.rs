//! modelforge - prompt-to-model platform API
//!
//! Turns prompts into (mock) model records, deploys them behind serving
//! URLs and answers mock inference calls, all on top of a document store.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod store;
