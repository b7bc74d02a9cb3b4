pub mod aggregate;
pub mod config;
pub mod errors;
pub mod logger;
pub mod output;
pub mod pack;
pub mod reporting;
pub mod trie;
pub mod utils;

pub use aggregate::{Aggregate, Aggregator, FileBlock};
pub use config::ScanConfig;
pub use errors::{PromptError, SkipReason};
pub use pack::{pack_project, PackRequest, PackSummary};
pub use reporting::Reporter;
