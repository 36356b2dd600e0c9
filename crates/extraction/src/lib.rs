//! Rule-based field extraction from chat messages
//!
//! Each sub-parser is pure and writes a disjoint slice of the trip
//! checklist, so one message may fill several fields at once and the
//! partial results merge without conflict. Precedence inside each parser
//! is explicit: pattern lists and keyword tables are evaluated
//! top-to-bottom and the first match wins.

pub mod budget;
pub mod dates;
pub mod extractor;
pub mod keywords;
pub mod places;

pub use budget::BudgetParser;
pub use dates::{DateParser, ParsedDates};
pub use extractor::FieldExtractor;
