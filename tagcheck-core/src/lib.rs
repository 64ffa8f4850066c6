pub mod check;
pub mod checks;
pub mod report;

pub use check::{
    CheckOptions, CheckProgressCallback, check_html, check_html_file, check_url, execute_check,
};
pub use tagcheck_scanner::{CheckError, DocumentSource, Fetcher, ResultMap, RetryPolicy};
