//! Data model: markup trees and feedback records.

mod markup;
mod record;

pub use markup::{BlockKind, MarkupNode, MarkupTree};
pub use record::{FeedbackRecord, FeedbackSection, GroupKey, SECTIONS};
