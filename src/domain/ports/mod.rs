mod document_store;

pub use document_store::{Deleter, DocumentStore, Inserter, Reader, Updater};
