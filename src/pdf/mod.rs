//! PDF canvas: the production [`Canvas`] implementation.
//!
//! Built on `genpdf`, which owns text wrapping and page-break-on-overflow;
//! this module translates sink commands into document elements and maps
//! our style flags onto the backend's style model.

mod underline;

use std::path::Path;

use genpdf::{elements, style, Alignment, Document, Element as _, Margins, SimplePageDecorator};
use log::error;

use crate::error::{Error, Result};
use crate::fonts::LoadedFonts;
use crate::render::{Align, Canvas, TextStyle};

pub use underline::UnderlinedParagraph;

/// Bottom margin reserved before the automatic page break, in mm.
const MARGIN_BOTTOM: f64 = 15.0;
/// Other page margins, in mm.
const MARGIN: f64 = 10.0;

/// One PDF document being built.
///
/// Content accumulates as elements; pagination happens when the finished
/// document is rendered during [`Canvas::finalize`].
pub struct PdfCanvas {
    doc: Option<Document>,
}

impl PdfCanvas {
    /// Start an empty document using the given font family.
    pub fn new(fonts: &LoadedFonts, title: &str) -> Self {
        let mut doc = Document::new(fonts.family.clone());
        doc.set_title(title);
        doc.set_font_size(10);
        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(Margins::trbl(MARGIN, MARGIN, MARGIN_BOTTOM, MARGIN));
        doc.set_page_decorator(decorator);
        PdfCanvas { doc: Some(doc) }
    }

    fn doc_mut(&mut self) -> Result<&mut Document> {
        self.doc
            .as_mut()
            .ok_or_else(|| Error::Other("document already finalized".to_string()))
    }
}

fn backend_style(style: TextStyle) -> style::Style {
    let mut out = style::Style::new().with_font_size(style.size);
    if style.bold {
        out = out.bold();
    }
    if style.italic {
        out = out.italic();
    }
    out
}

fn backend_alignment(align: Align) -> Alignment {
    match align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
    }
}

impl Canvas for PdfCanvas {
    fn multi_cell(&mut self, text: &str, style: TextStyle, align: Align) -> Result<()> {
        let doc = self.doc_mut()?;
        let backend = backend_style(style);
        // The backend's paragraphs treat newlines as plain whitespace;
        // honor them as explicit line boundaries instead.
        for line in text.split('\n') {
            if line.trim().is_empty() {
                doc.push(elements::Break::new(1.0));
            } else if style.underline {
                doc.push(UnderlinedParagraph::new(line).styled(backend));
            } else {
                doc.push(
                    elements::Paragraph::new(line)
                        .aligned(backend_alignment(align))
                        .styled(backend),
                );
            }
        }
        Ok(())
    }

    fn cell(&mut self, text: &str, style: TextStyle, align: Align) -> Result<()> {
        self.multi_cell(text, style, align)
    }

    fn line_break(&mut self, lines: f64) {
        if let Some(doc) = self.doc.as_mut() {
            doc.push(elements::Break::new(lines));
        }
    }

    fn page_break(&mut self) {
        if let Some(doc) = self.doc.as_mut() {
            doc.push(elements::PageBreak::new());
        }
    }

    fn finalize(&mut self, path: &Path) -> Result<()> {
        let doc = self
            .doc
            .take()
            .ok_or_else(|| Error::Other("document already finalized".to_string()))?;
        doc.render_to_file(path).map_err(|e| {
            error!("Error during document output");
            error!("Failed to write: {}", path.display());
            Error::OutputWrite {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })
    }
}
