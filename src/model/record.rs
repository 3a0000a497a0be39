//! Feedback record and grouping types for the tabular data source.

use serde::{Deserialize, Serialize};

/// One row of the spreadsheet export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Person the review is about.
    pub reviewee: String,
    /// Review cycle the feedback belongs to.
    pub cycle: String,
    /// Reviewee's team.
    pub team: String,
    /// Reviewee's position.
    pub position: String,
    /// Person who wrote the feedback.
    pub reviewer: String,
    /// Internal feedback-type tag (see [`SECTIONS`]).
    pub feedback_type: String,
    /// Raw launch-date cell; parsed lazily with a string fallback.
    pub launch_date: String,
    /// Question text.
    pub question: String,
    /// Question description text.
    pub description: String,
    /// Response markup; may be absent or blank.
    pub response: Option<String>,
}

impl FeedbackRecord {
    /// Grouping key for this record.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            reviewee: self.reviewee.clone(),
            cycle: self.cycle.clone(),
            team: self.team.clone(),
            position: self.position.clone(),
            reviewer: self.reviewer.clone(),
        }
    }
}

/// Identity of one output document: records sharing a key become one PDF.
///
/// Ordered so groups are processed deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    /// Person the review is about.
    pub reviewee: String,
    /// Review cycle name.
    pub cycle: String,
    /// Reviewee's team.
    pub team: String,
    /// Reviewee's position.
    pub position: String,
    /// Reviewer name.
    pub reviewer: String,
}

impl GroupKey {
    /// Deterministic output file name: reviewee (spaces replaced with
    /// underscores) joined with the cycle name.
    pub fn file_name(&self) -> String {
        let sanitized = self.reviewee.replace(' ', "_");
        format!("{}_{}.pdf", sanitized, self.cycle)
    }
}

/// One feedback section of the output document: the internal tag it is
/// driven by and the header it renders under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackSection {
    /// Feedback-type tag in the source data.
    pub feedback_type: &'static str,
    /// Display header emitted above the section.
    pub header: &'static str,
}

/// Sections in their fixed declared order. Two supervisor tags map to the
/// same header; each still produces its own section block when non-empty.
pub const SECTIONS: &[FeedbackSection] = &[
    FeedbackSection {
        feedback_type: "self_shared_feedback",
        header: "Employee Review",
    },
    FeedbackSection {
        feedback_type: "auto_shared_feedback",
        header: "Supervisor Review",
    },
    FeedbackSection {
        feedback_type: "shared_feedback",
        header: "Supervisor Review",
    },
];
