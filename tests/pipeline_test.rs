//! Integration tests for the full export-to-document pipeline.

use std::cell::RefCell;
use std::io::Write;
use std::path::Path;

use revpdf::render::{CanvasOp, RecordingCanvas};
use revpdf::{group_records, load_records, Assembler, CanvasFactory};

const HEADER: &str = "Reviewee name,Review Cycle name,Team - Reviewee,Position - Reviewee,Reviewer's name,Feedback type,Review cycle launch date,Question,Question description,Response comment";

/// Factory handing out recording canvases and keeping a handle on each.
#[derive(Default)]
struct RecordingFactory {
    created: RefCell<Vec<(String, RecordingCanvas)>>,
}

impl RecordingFactory {
    fn canvases(&self) -> Vec<(String, RecordingCanvas)> {
        self.created.borrow().clone()
    }
}

impl CanvasFactory for RecordingFactory {
    type Canvas = RecordingCanvas;

    fn create(&self, title: &str) -> RecordingCanvas {
        let canvas = RecordingCanvas::default();
        self.created
            .borrow_mut()
            .push((title.to_string(), canvas.clone()));
        canvas
    }
}

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

fn run_pipeline(csv_lines: &[&str]) -> (Vec<std::path::PathBuf>, Vec<(String, RecordingCanvas)>) {
    let file = write_csv(csv_lines);
    let records = load_records(file.path()).unwrap();
    let out = tempfile::tempdir().unwrap();
    let assembler = Assembler::new(RecordingFactory::default(), out.path());
    let mut paths = Vec::new();
    for (key, group) in group_records(records) {
        paths.push(assembler.generate_document(&key, &group).unwrap());
    }
    let canvases = assembler.factory().canvases();
    (paths, canvases)
}

#[test]
fn test_export_groups_into_deterministic_documents() {
    let (paths, canvases) = run_pipeline(&[
        HEADER,
        "Jo Doe,2024 H1,Platform,Engineer,Ana,self_shared_feedback,2024-03-01,How did it go?,Context,<p>It went <b>well</b>.</p>",
        "Bea Lin,2024 H1,Design,Designer,Ana,shared_feedback,2024-03-01,Strengths?,Context,<ul><li>clear</li><li>kind</li></ul>",
        "Jo Doe,2024 H1,Platform,Engineer,Ana,shared_feedback,2024-03-01,Growth area?,Context,",
    ]);

    assert_eq!(paths.len(), 2);
    // Sorted group order, filenames with spaces underscored in the reviewee.
    assert!(paths[0].ends_with(Path::new("Bea_Lin_2024 H1.pdf")));
    assert!(paths[1].ends_with(Path::new("Jo_Doe_2024 H1.pdf")));

    assert_eq!(canvases.len(), 2);
    assert_eq!(canvases[0].0, "Bea Lin - 2024 H1");
    assert_eq!(canvases[1].0, "Jo Doe - 2024 H1");
}

#[test]
fn test_sections_and_markup_flow_through() {
    let (_, canvases) = run_pipeline(&[
        HEADER,
        "Jo Doe,2024 H1,Platform,Engineer,Ana,self_shared_feedback,2024-03-01,How did it go?,Context,<p>It went <b>well</b>.</p>",
        "Jo Doe,2024 H1,Platform,Engineer,Ana,auto_shared_feedback,2024-03-01,Summary,Context,<ol><li>one</li><li>two</li></ol>",
    ]);

    let lines = canvases[0].1.lines();
    assert!(lines.contains(&"Employee Review".to_string()));
    assert!(lines.contains(&"Supervisor Review".to_string()));
    assert!(lines.contains(&"It went".to_string()));
    assert!(lines.contains(&"well".to_string()));
    assert!(lines.contains(&"1. one".to_string()));
    assert!(lines.contains(&"2. two".to_string()));
}

#[test]
fn test_blank_response_gets_placeholder() {
    let (_, canvases) = run_pipeline(&[
        HEADER,
        "Jo Doe,2024 H1,Platform,Engineer,Ana,shared_feedback,2024-03-01,Q,D,",
    ]);

    let lines = canvases[0].1.lines();
    assert!(lines.contains(&"No comment provided.".to_string()));
}

#[test]
fn test_table_response_is_skipped_but_run_continues() {
    let (paths, canvases) = run_pipeline(&[
        HEADER,
        "Jo Doe,2024 H1,Platform,Engineer,Ana,shared_feedback,2024-03-01,Q1,D,<table><tr><td>n</td></tr></table>",
        "Jo Doe,2024 H1,Platform,Engineer,Ana,shared_feedback,2024-03-01,Q2,D,<p>fine</p>",
    ]);

    assert_eq!(paths.len(), 1);
    let lines = canvases[0].1.lines();
    assert!(lines.contains(&"Question: Q1".to_string()));
    assert!(lines.contains(&"fine".to_string()));
    assert!(!lines.iter().any(|l| l.contains("<table>")));
}

#[test]
fn test_every_document_is_finalized_exactly_once() {
    let (_, canvases) = run_pipeline(&[
        HEADER,
        "Jo Doe,2024 H1,Platform,Engineer,Ana,shared_feedback,2024-03-01,Q,D,<p>x</p>",
        "Bea Lin,2024 H1,Design,Designer,Ana,shared_feedback,2024-03-01,Q,D,<p>y</p>",
    ]);

    for (_, canvas) in &canvases {
        let finalizes = canvas
            .ops()
            .iter()
            .filter(|op| matches!(op, CanvasOp::Finalize(_)))
            .count();
        assert_eq!(finalizes, 1);
    }
}
