//! An in-memory canvas that records every sink command.
//!
//! Lets the walker, list renderer and assembler be exercised without a
//! PDF backend: tests assert on the recorded operation sequence instead
//! of parsing output bytes. Clones share the same log, so a handle kept
//! before handing the canvas off still sees everything recorded into it.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::render::emitter::{Align, Canvas, TextStyle};

/// One recorded sink command.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    /// A wrapped text block.
    MultiCell(TextBlock),
    /// A fixed text line.
    Cell(TextBlock),
    /// Vertical gap, in line units.
    LineBreak(f64),
    /// Explicit page break.
    PageBreak,
    /// Finalize-to-destination.
    Finalize(PathBuf),
}

/// Text plus the style/alignment it was emitted with.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Emitted text.
    pub text: String,
    /// Style flags at emission time.
    pub style: TextStyle,
    /// Block alignment.
    pub align: Align,
}

/// Canvas test double recording all operations.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    ops: Rc<RefCell<Vec<CanvasOp>>>,
    fail_on_emit: bool,
}

impl RecordingCanvas {
    /// A canvas whose text emissions all fail, for failure-path tests.
    pub fn failing() -> Self {
        RecordingCanvas {
            ops: Rc::default(),
            fail_on_emit: true,
        }
    }

    /// Every command in emission order.
    pub fn ops(&self) -> Vec<CanvasOp> {
        self.ops.borrow().clone()
    }

    /// All text blocks (wrapped and fixed) in emission order.
    pub fn text_blocks(&self) -> Vec<TextBlock> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                CanvasOp::MultiCell(block) | CanvasOp::Cell(block) => Some(block.clone()),
                _ => None,
            })
            .collect()
    }

    /// Emitted text lines, for order-of-content assertions.
    pub fn lines(&self) -> Vec<String> {
        self.text_blocks().into_iter().map(|b| b.text).collect()
    }

    /// Paths passed to finalize, in order.
    pub fn finalized_paths(&self) -> Vec<PathBuf> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Finalize(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: CanvasOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl Canvas for RecordingCanvas {
    fn multi_cell(&mut self, text: &str, style: TextStyle, align: Align) -> Result<()> {
        if self.fail_on_emit {
            return Err(Error::Render {
                payload: text.to_string(),
                message: "recording canvas configured to fail".to_string(),
            });
        }
        self.record(CanvasOp::MultiCell(TextBlock {
            text: text.to_string(),
            style,
            align,
        }));
        Ok(())
    }

    fn cell(&mut self, text: &str, style: TextStyle, align: Align) -> Result<()> {
        if self.fail_on_emit {
            return Err(Error::Render {
                payload: text.to_string(),
                message: "recording canvas configured to fail".to_string(),
            });
        }
        self.record(CanvasOp::Cell(TextBlock {
            text: text.to_string(),
            style,
            align,
        }));
        Ok(())
    }

    fn line_break(&mut self, lines: f64) {
        self.record(CanvasOp::LineBreak(lines));
    }

    fn page_break(&mut self) {
        self.record(CanvasOp::PageBreak);
    }

    fn finalize(&mut self, path: &Path) -> Result<()> {
        self.record(CanvasOp::Finalize(path.to_path_buf()));
        Ok(())
    }
}
