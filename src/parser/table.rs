//! Tabular data source: loads the spreadsheet export and groups its rows.
//!
//! The export is consumed as a CSV sheet with one row per feedback answer.
//! Rows sharing a (reviewee, cycle, team, position, reviewer) key become
//! one output document.

use std::collections::BTreeMap;
use std::path::Path;

use csv::StringRecord;
use log::info;

use crate::error::{Error, Result};
use crate::model::{FeedbackRecord, GroupKey};

/// Required column headers, sans the reviewer column which has two
/// spellings in the wild (see [`REVIEWER_COLUMNS`]).
pub const COL_REVIEWEE: &str = "Reviewee name";
/// Review cycle column.
pub const COL_CYCLE: &str = "Review Cycle name";
/// Reviewee team column.
pub const COL_TEAM: &str = "Team - Reviewee";
/// Reviewee position column.
pub const COL_POSITION: &str = "Position - Reviewee";
/// Feedback-type tag column.
pub const COL_FEEDBACK_TYPE: &str = "Feedback type";
/// Launch-date column.
pub const COL_LAUNCH_DATE: &str = "Review cycle launch date";
/// Question column.
pub const COL_QUESTION: &str = "Question";
/// Question description column.
pub const COL_DESCRIPTION: &str = "Question description";
/// Response markup column (nullable).
pub const COL_RESPONSE: &str = "Response comment";

/// Accepted spellings of the reviewer name column, in detection order.
pub const REVIEWER_COLUMNS: &[&str] = &["Reviewer's name", "Reviewers name"];

/// Column positions resolved against the sheet header row.
struct ColumnMap {
    reviewee: usize,
    cycle: usize,
    team: usize,
    position: usize,
    reviewer: usize,
    feedback_type: usize,
    launch_date: usize,
    question: usize,
    description: usize,
    response: usize,
}

impl ColumnMap {
    /// Resolve all required columns, reporting every missing one at once.
    fn detect(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let reviewer = REVIEWER_COLUMNS.iter().find_map(|name| find(name));

        let mut missing = Vec::new();
        let mut require = |name: &str| match find(name) {
            Some(idx) => idx,
            None => {
                missing.push(name.to_string());
                0
            }
        };

        let map = ColumnMap {
            reviewee: require(COL_REVIEWEE),
            cycle: require(COL_CYCLE),
            team: require(COL_TEAM),
            position: require(COL_POSITION),
            reviewer: reviewer.unwrap_or(0),
            feedback_type: require(COL_FEEDBACK_TYPE),
            launch_date: require(COL_LAUNCH_DATE),
            question: require(COL_QUESTION),
            description: require(COL_DESCRIPTION),
            response: require(COL_RESPONSE),
        };

        if reviewer.is_none() {
            missing.push(format!(
                "{} (or {})",
                REVIEWER_COLUMNS[0], REVIEWER_COLUMNS[1]
            ));
        }
        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }
        Ok(map)
    }

    fn record(&self, row: &StringRecord) -> FeedbackRecord {
        let cell = |idx: usize| row.get(idx).unwrap_or_default().to_string();
        let response = row
            .get(self.response)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);

        FeedbackRecord {
            reviewee: cell(self.reviewee),
            cycle: cell(self.cycle),
            team: cell(self.team),
            position: cell(self.position),
            reviewer: cell(self.reviewer),
            feedback_type: cell(self.feedback_type),
            launch_date: cell(self.launch_date),
            question: cell(self.question),
            description: cell(self.description),
            response,
        }
    }
}

/// Load all feedback records from a CSV export in source row order.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<FeedbackRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())?;
    let columns = ColumnMap::detect(reader.headers()?)?;

    let mut records = Vec::new();
    for row in reader.records() {
        records.push(columns.record(&row?));
    }
    info!(
        "Loaded {} feedback records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Group records by document key.
///
/// Groups come out in sorted key order; rows inside each group keep their
/// source order.
pub fn group_records(records: Vec<FeedbackRecord>) -> Vec<(GroupKey, Vec<FeedbackRecord>)> {
    let mut groups: BTreeMap<GroupKey, Vec<FeedbackRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.group_key()).or_default().push(record);
    }
    groups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Reviewee name,Review Cycle name,Team - Reviewee,Position - Reviewee,Reviewer's name,Feedback type,Review cycle launch date,Question,Question description,Response comment";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        for line in lines {
            writeln!(file, "{line}").expect("write csv");
        }
        file
    }

    #[test]
    fn test_load_records() {
        let file = write_csv(&[
            HEADER,
            "Jo Doe,2024 H1,Platform,Engineer,Ana,shared_feedback,2024-03-01,Q1,Desc,<p>ok</p>",
            "Jo Doe,2024 H1,Platform,Engineer,Ana,self_shared_feedback,2024-03-01,Q2,Desc,",
        ]);
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reviewee, "Jo Doe");
        assert_eq!(records[0].response.as_deref(), Some("<p>ok</p>"));
        assert_eq!(records[1].response, None);
    }

    #[test]
    fn test_reviewer_column_variant() {
        let header = HEADER.replace("Reviewer's name", "Reviewers name");
        let file = write_csv(&[
            &header,
            "Jo,C,T,P,Ana,shared_feedback,2024-01-01,Q,D,",
        ]);
        let records = load_records(file.path()).unwrap();
        assert_eq!(records[0].reviewer, "Ana");
    }

    #[test]
    fn test_missing_columns_reported_by_name() {
        let file = write_csv(&[
            "Reviewee name,Review Cycle name,Feedback type",
            "Jo,C,shared_feedback",
        ]);
        let err = load_records(file.path()).unwrap_err();
        let Error::MissingColumns(missing) = err else {
            panic!("expected MissingColumns, got {err}");
        };
        assert!(missing.contains(&COL_TEAM.to_string()));
        assert!(missing.contains(&COL_QUESTION.to_string()));
        assert!(missing.iter().any(|m| m.contains("Reviewer's name")));
    }

    #[test]
    fn test_grouping_preserves_row_order_within_group() {
        let file = write_csv(&[
            HEADER,
            "Jo,C1,T,P,Ana,shared_feedback,2024-01-01,Q first,D,",
            "Bea,C1,T,P,Ana,shared_feedback,2024-01-01,Q other,D,",
            "Jo,C1,T,P,Ana,self_shared_feedback,2024-01-01,Q second,D,",
        ]);
        let groups = group_records(load_records(file.path()).unwrap());
        assert_eq!(groups.len(), 2);
        // Sorted key order: Bea before Jo.
        assert_eq!(groups[0].0.reviewee, "Bea");
        let jo = &groups[1].1;
        assert_eq!(jo[0].question, "Q first");
        assert_eq!(jo[1].question, "Q second");
    }
}
