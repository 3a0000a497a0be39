//! # revpdf
//!
//! Review-feedback export to PDF.
//!
//! This library reads a review-feedback export (one row per answered
//! question), groups rows by reviewee and review cycle, and writes one
//! paginated PDF per group. Response comments may carry rich markup
//! (paragraphs, bold/italic/underline, nested lists), which is rendered
//! into styled text blocks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use revpdf::{generate_documents, GenerateOptions};
//!
//! fn main() -> revpdf::Result<()> {
//!     let options = GenerateOptions::default();
//!     let paths = generate_documents("feedback_export.csv", &options)?;
//!     for path in paths {
//!         println!("Generated: {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One PDF per reviewee and cycle**: deterministic grouping and naming
//! - **Rich comment markup**: paragraphs, inline styles, nested lists
//! - **Fixed section layout**: employee and supervisor review sections
//! - **Unicode font presets**: NotoSans (default) and DejaVuSans
//! - **Resilient rendering**: malformed markup degrades, never aborts a run

pub mod convert;
pub mod error;
pub mod fonts;
pub mod model;
pub mod parser;
pub mod pdf;
pub mod render;

// Re-export commonly used types
pub use convert::{Assembler, CanvasFactory, PdfCanvasFactory, OUTPUT_SUBDIR};
pub use error::{Error, Result};
pub use fonts::{FontPreset, LoadedFonts, DEFAULT_PRESET, FONT_PRESETS};
pub use model::{BlockKind, FeedbackRecord, FeedbackSection, GroupKey, MarkupNode, MarkupTree, SECTIONS};
pub use parser::{group_records, load_records, parse_markup};
pub use render::{Align, Canvas, Emitter, TextStyle};

use std::path::{Path, PathBuf};

/// Options for [`generate_documents`].
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Font preset key, see [`FONT_PRESETS`].
    pub font_preset: String,
    /// Directory holding the preset font folders.
    pub fonts_dir: PathBuf,
    /// Output directory. Defaults to `generated_pdfs` beside the source.
    pub output_dir: Option<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            font_preset: DEFAULT_PRESET.to_string(),
            fonts_dir: PathBuf::from("fonts"),
            output_dir: None,
        }
    }
}

/// Read a feedback export and generate all PDF documents.
///
/// Returns the written paths in deterministic group order.
///
/// # Example
///
/// ```no_run
/// use revpdf::{generate_documents, GenerateOptions};
///
/// let options = GenerateOptions {
///     font_preset: "dejavu".to_string(),
///     ..GenerateOptions::default()
/// };
/// let paths = generate_documents("export.csv", &options).unwrap();
/// ```
pub fn generate_documents<P: AsRef<Path>>(
    source: P,
    options: &GenerateOptions,
) -> Result<Vec<PathBuf>> {
    let source = source.as_ref();
    let fonts = FontPreset::by_key(&options.font_preset)?.load(&options.fonts_dir)?;
    let records = load_records(source)?;

    let output_dir = options.output_dir.clone().unwrap_or_else(|| {
        source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
            .join(OUTPUT_SUBDIR)
    });

    let assembler = Assembler::new(PdfCanvasFactory::new(fonts), output_dir);
    assembler.generate_all(records)
}
