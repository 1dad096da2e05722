//! Data-access layer for ingested file records kept in a document index.
//!
//! Records are stored as JSON documents addressed by `(index, id)`. The
//! [`application::DocumentService`] returns typed results for every
//! operation; [`application::LegacyDocumentOperations`] keeps the older
//! log-and-continue contract for callers that still expect it.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
