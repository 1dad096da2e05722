//! Application layer - Use cases and orchestration.
//!
//! Services here depend on the document store ports rather than on a
//! concrete client, so the Elasticsearch adapter and the in-memory store
//! are interchangeable.

pub mod services;

pub use services::{DocumentService, LegacyDocumentOperations, NOT_FOUND_SENTINEL};
