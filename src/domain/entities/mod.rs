mod file_record;

pub use file_record::{strip_nulls, FileRecord, ModelType};
