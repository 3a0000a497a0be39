//! Paginated text emission on top of an abstract output canvas.
//!
//! The canvas owns wrapping and pagination: callers hand it logical text
//! blocks and never assume content stays on one page. The emitter layers
//! the per-document [`RenderState`] and the log-then-propagate failure
//! policy on top.

use std::path::Path;

use log::error;

use crate::error::Result;

/// Style flags applied to one emitted text block.
///
/// The output format offers regular, bold, italic, underline and
/// bold-italic variants; the flags compose within those limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Font size in points.
    pub size: u8,
    /// Bold variant.
    pub bold: bool,
    /// Italic variant.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle::body()
    }
}

impl TextStyle {
    /// Regular body text (10pt).
    pub fn body() -> Self {
        TextStyle {
            size: 10,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    /// Same flags at another size.
    pub fn sized(size: u8) -> Self {
        TextStyle {
            size,
            ..TextStyle::body()
        }
    }

    /// Turn on the bold flag.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Turn on the italic flag.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Turn on the underline flag.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

/// Horizontal alignment of an emitted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Left aligned (default for body content).
    Left,
    /// Centered (title block).
    Center,
}

/// Output canvas/document sink boundary.
///
/// Implementations accept styled text emission commands, vertical gaps,
/// page breaks and a finalize-to-destination command. Text wrapping and
/// page-break-on-overflow are the implementation's responsibility.
pub trait Canvas {
    /// Emit a wrapped text block.
    fn multi_cell(&mut self, text: &str, style: TextStyle, align: Align) -> Result<()>;

    /// Emit a single fixed line (header fields, labels).
    fn cell(&mut self, text: &str, style: TextStyle, align: Align) -> Result<()>;

    /// Advance the vertical cursor by a fraction of a line.
    fn line_break(&mut self, lines: f64);

    /// Force a page break.
    fn page_break(&mut self);

    /// Write the finished document to `path`, consuming its content.
    fn finalize(&mut self, path: &Path) -> Result<()>;
}

/// Mutable per-document rendering state: current style flags plus block
/// accounting. The vertical cursor and page index live inside the canvas.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    style: TextStyle,
    blocks_emitted: usize,
}

/// Emits styled text blocks into a [`Canvas`], tracking [`RenderState`].
///
/// Any canvas failure is reported with the offending payload before being
/// propagated; silent truncation of review content is worse than aborting.
pub struct Emitter<'a, C: Canvas> {
    canvas: &'a mut C,
    state: RenderState,
}

impl<'a, C: Canvas> Emitter<'a, C> {
    /// Wrap a canvas with fresh render state.
    pub fn new(canvas: &'a mut C) -> Self {
        Emitter {
            canvas,
            state: RenderState::default(),
        }
    }

    /// Current style; subsequent blocks are emitted with it.
    pub fn style(&self) -> TextStyle {
        self.state.style
    }

    /// Switch the current style.
    pub fn set_style(&mut self, style: TextStyle) {
        self.state.style = style;
    }

    /// Number of text blocks emitted into this document so far.
    pub fn blocks_emitted(&self) -> usize {
        self.state.blocks_emitted
    }

    /// Emit one wrapped text block at the current style.
    pub fn emit(&mut self, text: &str, align: Align) -> Result<()> {
        if let Err(e) = self.canvas.multi_cell(text, self.state.style, align) {
            error!("Failed on text block: {}", salient(text));
            return Err(e);
        }
        self.state.blocks_emitted += 1;
        Ok(())
    }

    /// Emit one fixed line at the current style.
    pub fn emit_line(&mut self, text: &str, align: Align) -> Result<()> {
        if let Err(e) = self.canvas.cell(text, self.state.style, align) {
            error!("Failed on cell text: {}", salient(text));
            return Err(e);
        }
        self.state.blocks_emitted += 1;
        Ok(())
    }

    /// Emit a vertical gap.
    pub fn gap(&mut self, lines: f64) {
        self.canvas.line_break(lines);
    }
}

/// Salient portion of a payload for diagnostics.
fn salient(text: &str) -> String {
    const MAX: usize = 120;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX).collect();
        format!("{head}…")
    }
}
