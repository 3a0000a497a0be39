//! Parsers for the two inputs: response markup and the tabular export.

mod markup;
mod table;

pub use markup::parse_markup;
pub use table::{group_records, load_records, REVIEWER_COLUMNS};
