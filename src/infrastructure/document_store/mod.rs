mod elasticsearch;
mod in_memory;

pub use elasticsearch::ElasticsearchDocumentStore;
pub use in_memory::InMemoryDocumentStore;
