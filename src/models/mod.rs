pub mod export;
pub mod format;
pub mod processing;
pub mod transaction;

pub use export::{ExportOutcome, ExportResponse};
pub use format::ExportFormat;
pub use processing::{BatchResult, ProcessingResult, ProcessingStatus};
pub use transaction::Transaction;
