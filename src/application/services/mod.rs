mod document;
mod legacy;

pub use document::DocumentService;
pub use legacy::{LegacyDocumentOperations, NOT_FOUND_SENTINEL};
