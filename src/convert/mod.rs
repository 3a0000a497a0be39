//! Document assembly: one PDF per record group.
//!
//! The assembler walks record groups in deterministic order, emits the
//! title block and the configured feedback sections, hands each response
//! comment to the markup walker and finalizes the document to its
//! deterministic path.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use log::{error, info};

use crate::error::Result;
use crate::fonts::LoadedFonts;
use crate::model::{FeedbackRecord, GroupKey, SECTIONS};
use crate::parser::group_records;
use crate::pdf::PdfCanvas;
use crate::render::{render_comment, sanitize, Align, Canvas, Emitter, TextStyle};

/// Output subdirectory created beside the source file.
pub const OUTPUT_SUBDIR: &str = "generated_pdfs";

/// Gap after the title block, in line units.
const TITLE_GAP: f64 = 2.0;
/// Gap after a section header.
const SECTION_GAP: f64 = 1.0;
/// Gap after each record's comment.
const RECORD_GAP: f64 = 1.0;

/// Creates one fresh canvas per output document.
pub trait CanvasFactory {
    /// The canvas type produced.
    type Canvas: Canvas;

    /// Start an empty document titled `title`.
    fn create(&self, title: &str) -> Self::Canvas;
}

/// Production factory: PDF documents with a validated font family.
pub struct PdfCanvasFactory {
    fonts: LoadedFonts,
}

impl PdfCanvasFactory {
    /// Build a factory around loaded fonts.
    pub fn new(fonts: LoadedFonts) -> Self {
        PdfCanvasFactory { fonts }
    }
}

impl CanvasFactory for PdfCanvasFactory {
    type Canvas = PdfCanvas;

    fn create(&self, title: &str) -> PdfCanvas {
        PdfCanvas::new(&self.fonts, title)
    }
}

/// Builds one document per record group.
pub struct Assembler<F: CanvasFactory> {
    factory: F,
    output_dir: PathBuf,
}

impl<F: CanvasFactory> Assembler<F> {
    /// Assemble into `output_dir`, which is created on demand.
    pub fn new(factory: F, output_dir: impl Into<PathBuf>) -> Self {
        Assembler {
            factory,
            output_dir: output_dir.into(),
        }
    }

    /// Directory the documents are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The canvas factory in use.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Generate every group's document, in deterministic group order.
    pub fn generate_all(&self, records: Vec<FeedbackRecord>) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;
        let mut paths = Vec::new();
        for (key, group) in group_records(records) {
            let path = self.generate_document(&key, &group)?;
            info!("Generated: {}", path.display());
            paths.push(path);
        }
        Ok(paths)
    }

    /// Generate the document for one record group and write it out.
    ///
    /// The caller is responsible for the output directory existing when
    /// invoking this directly (see [`Assembler::generate_all`]).
    pub fn generate_document(
        &self,
        key: &GroupKey,
        records: &[FeedbackRecord],
    ) -> Result<PathBuf> {
        let title = sanitize(Some(format!("{} - {}", key.reviewee, key.cycle).as_str()));
        let mut canvas = self.factory.create(&title);

        {
            let mut emitter = Emitter::new(&mut canvas);
            self.emit_title_block(key, &title, &mut emitter)?;

            for section in SECTIONS {
                let rows: Vec<&FeedbackRecord> = records
                    .iter()
                    .filter(|r| r.feedback_type == section.feedback_type)
                    .collect();
                if rows.is_empty() {
                    continue;
                }

                emitter.set_style(TextStyle::sized(14));
                emitter.emit_line(section.header, Align::Left)?;
                emitter.gap(SECTION_GAP);

                for row in rows {
                    self.emit_record(key, row, &mut emitter)?;
                }
            }
        }

        let path = self.output_dir.join(key.file_name());
        if let Err(e) = canvas.finalize(&path) {
            error!("Failed to write document: {}", path.display());
            return Err(e);
        }
        Ok(path)
    }

    fn emit_title_block<C: Canvas>(
        &self,
        key: &GroupKey,
        title: &str,
        emitter: &mut Emitter<C>,
    ) -> Result<()> {
        emitter.set_style(TextStyle::sized(16).bold());
        emitter.emit_line(title, Align::Center)?;
        emitter.set_style(TextStyle::body());
        let team = format!("Team: {}", key.team);
        emitter.emit_line(&sanitize(Some(team.as_str())), Align::Center)?;
        let position = format!("Position: {}", key.position);
        emitter.emit_line(&sanitize(Some(position.as_str())), Align::Center)?;
        emitter.gap(TITLE_GAP);
        Ok(())
    }

    fn emit_record<C: Canvas>(
        &self,
        key: &GroupKey,
        row: &FeedbackRecord,
        emitter: &mut Emitter<C>,
    ) -> Result<()> {
        let date = format_launch_date(&row.launch_date);
        let date_line = format!("Date: {} / Reviewer: {}", date, key.reviewer);
        emitter.set_style(TextStyle::sized(8));
        emitter.emit(&sanitize(Some(date_line.as_str())), Align::Left)?;

        let question = format!("Question: {}", row.question);
        emitter.set_style(TextStyle::sized(12).bold());
        emitter.emit(&sanitize(Some(question.as_str())), Align::Left)?;

        emitter.set_style(TextStyle::body().bold());
        emitter.emit(&sanitize(Some(row.description.as_str())), Align::Left)?;
        emitter.emit_line("Response:", Align::Left)?;

        emitter.set_style(TextStyle::body());
        render_comment(row.response.as_deref(), emitter)?;
        emitter.gap(RECORD_GAP);
        Ok(())
    }
}

/// Render the launch date as `YYYY-MM-DD`, falling back to the sanitized
/// raw cell when it does not parse as a date.
pub fn format_launch_date(raw: &str) -> String {
    let trimmed = raw.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    sanitize(Some(trimmed))
}
