pub mod email_extractor;

pub use email_extractor::{EmailExtractor, EmailReport, EMAIL_PATTERN};
