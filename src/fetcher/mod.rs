pub mod title_fetcher;
pub mod title_log;

pub use title_fetcher::{validate_http_url, TitleFetcher, TitleOutcome};
pub use title_log::{TitleLog, TitleLogEntry};
