pub mod config;
pub mod export;
pub mod ledger;
pub mod sources;

pub use config::{ConfigError, TallyConfig};
pub use export::{export_results, export_results_to_string, ExportError};
pub use ledger::{import_ledger, load_ledger, LedgerCsvProfile, LedgerError};
pub use sources::{import_sources, load_sources, SourceError};
