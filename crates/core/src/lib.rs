pub mod date;
pub mod money;
pub mod record;

pub use date::{days_apart, parse_calendar_date};
pub use money::Money;
pub use record::{CandidateRecord, SourceRecord};
