pub mod document;
pub mod error;
pub mod evaluator;
pub mod fetcher;
pub mod result;

pub use document::ParsedDocument;
pub use error::CheckError;
pub use evaluator::evaluate;
pub use fetcher::{DocumentSource, Fetcher, RetryCallback, RetryPolicy};
pub use result::ResultMap;
