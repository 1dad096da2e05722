pub mod config;
pub mod document_store;

pub use config::{Config, ElasticsearchConfig, ServerConfig};
pub use document_store::{ElasticsearchDocumentStore, InMemoryDocumentStore};
