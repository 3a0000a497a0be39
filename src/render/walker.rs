//! Markup tree walker: interprets a parsed comment tree into styled,
//! wrapped text blocks on the emitter.
//!
//! Dispatch policy per node kind:
//! - `Text` is sanitized and emitted at the current style.
//! - `Paragraph` renders its children, then a fixed paragraph gap.
//! - `Bold`/`Italic`/`Underline` emit their flattened text in a single
//!   style; nested inline composition is deliberately not supported.
//! - Lists are delegated to the list renderer at indent 0.
//! - `Unknown` falls back to flattened plain text, never dropped.
//!
//! A comment whose markup contains a table is rejected before walking:
//! one diagnostic, zero blocks, and the rest of the document continues.

use log::{error, warn};

use crate::error::{Error, Result};
use crate::model::{BlockKind, MarkupNode};
use crate::parser::parse_markup;
use crate::render::emitter::{Align, Canvas, Emitter, TextStyle};
use crate::render::list::{render_items, BulletStyle};
use crate::render::sanitize::sanitize;

/// Placeholder emitted when a response field is missing or blank.
pub const NO_COMMENT_PLACEHOLDER: &str = "No comment provided.";

/// Vertical gap after a paragraph, in line units. A document-level
/// spacing convention, not derived from content.
const PARAGRAPH_GAP: f64 = 0.4;

/// Render one response-comment field.
///
/// Missing or whitespace-only comments produce exactly one italic
/// placeholder line. Tables abort this field only.
pub fn render_comment<C: Canvas>(comment: Option<&str>, emitter: &mut Emitter<C>) -> Result<()> {
    let Some(raw) = comment.filter(|s| !s.trim().is_empty()) else {
        let previous = emitter.style();
        emitter.set_style(TextStyle::body().italic());
        emitter.emit(NO_COMMENT_PLACEHOLDER, Align::Left)?;
        emitter.set_style(previous);
        return Ok(());
    };

    let tree = match parse_markup(raw) {
        Ok(tree) => tree,
        Err(Error::Markup(reason)) => {
            // Unparseable markup degrades to plain text, like Unknown tags.
            warn!("Could not parse response markup ({reason}); rendering as plain text");
            return emitter.emit(&sanitize(Some(raw)), Align::Left);
        }
        Err(e) => return Err(e),
    };

    if tree.contains_table {
        error!("Markup contains a table. Rendering tables is not supported; field skipped.");
        return Ok(());
    }

    for node in &tree.nodes {
        render_node(node, emitter)?;
    }
    Ok(())
}

/// Render one markup node, dispatching on its kind.
pub fn render_node<C: Canvas>(node: &MarkupNode, emitter: &mut Emitter<C>) -> Result<()> {
    match node {
        MarkupNode::Text(content) => {
            let text = sanitize(Some(content.as_str()));
            if !text.trim().is_empty() {
                emitter.emit(text.trim(), Align::Left)?;
            }
        }

        MarkupNode::Block {
            kind: BlockKind::Paragraph,
            children,
        } => {
            for child in children {
                render_node(child, emitter)?;
            }
            emitter.gap(PARAGRAPH_GAP);
        }

        MarkupNode::Block {
            kind: kind @ (BlockKind::Bold | BlockKind::Italic | BlockKind::Underline),
            ..
        } => {
            let flat = node.flatten_text();
            let text = sanitize(Some(flat.as_str()));
            if !text.trim().is_empty() {
                let previous = emitter.style();
                emitter.set_style(single_style(*kind, previous));
                emitter.emit(text.trim(), Align::Left)?;
                emitter.set_style(previous);
            }
        }

        MarkupNode::Block {
            kind: BlockKind::UnorderedList,
            children,
        } => render_items(children, BulletStyle::Bullet, 0, emitter)?,

        MarkupNode::Block {
            kind: BlockKind::OrderedList,
            children,
        } => render_items(children, BulletStyle::Numbered, 0, emitter)?,

        // Fallback: unrecognized content is flattened, never dropped.
        MarkupNode::Block {
            kind: BlockKind::Unknown,
            ..
        }
        | MarkupNode::ListItem(_) => {
            let flat = node.flatten_text();
            let text = sanitize(Some(flat.as_str()));
            if !text.trim().is_empty() {
                emitter.emit(text.trim(), Align::Left)?;
            }
        }
    }
    Ok(())
}

/// Single style for an inline tag: one flag at body size, composed onto
/// nothing (flattening already discarded any nested styling).
fn single_style(kind: BlockKind, base: TextStyle) -> TextStyle {
    let style = TextStyle::sized(base.size);
    match kind {
        BlockKind::Bold => style.bold(),
        BlockKind::Italic => style.italic(),
        BlockKind::Underline => style.underline(),
        _ => style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingCanvas;

    fn render(comment: Option<&str>) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::default();
        let mut emitter = Emitter::new(&mut canvas);
        render_comment(comment, &mut emitter).unwrap();
        canvas
    }

    #[test]
    fn test_missing_comment_placeholder() {
        for comment in [None, Some(""), Some("   \n\t ")] {
            let canvas = render(comment);
            let blocks = canvas.text_blocks();
            assert_eq!(blocks.len(), 1, "comment {comment:?}");
            assert_eq!(blocks[0].text, NO_COMMENT_PLACEHOLDER);
            assert!(blocks[0].style.italic);
            assert!(!blocks[0].style.bold);
        }
    }

    #[test]
    fn test_table_rejection_emits_nothing() {
        let canvas = render(Some("<p>intro</p><table><tr><td>x</td></tr></table>"));
        assert!(canvas.text_blocks().is_empty());
    }

    #[test]
    fn test_paragraph_children_then_gap() {
        let canvas = render(Some("<p>first sentence.</p>"));
        assert_eq!(canvas.lines(), vec!["first sentence."]);
        assert!(canvas
            .ops()
            .iter()
            .any(|op| matches!(op, crate::render::CanvasOp::LineBreak(_))));
    }

    #[test]
    fn test_inline_styles_do_not_persist() {
        let canvas = render(Some("<b>strong part</b>plain tail"));
        let blocks = canvas.text_blocks();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].style.bold);
        assert_eq!(blocks[1].text, "plain tail");
        assert!(!blocks[1].style.bold);
    }

    #[test]
    fn test_underline_style() {
        let canvas = render(Some("<u>signed clause</u>"));
        let blocks = canvas.text_blocks();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].style.underline);
        assert!(!blocks[0].style.bold && !blocks[0].style.italic);
    }

    #[test]
    fn test_nested_inline_styling_is_flattened() {
        let canvas = render(Some("<b>one <i>two</i> three</b>"));
        let blocks = canvas.text_blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "one two three");
        assert!(blocks[0].style.bold);
        assert!(!blocks[0].style.italic);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_text() {
        let canvas = render(Some("<blockquote>kept content</blockquote>"));
        assert_eq!(canvas.lines(), vec!["kept content"]);
    }

    #[test]
    fn test_blank_inline_tag_emits_nothing() {
        let canvas = render(Some("<b>   </b><p>  </p>"));
        assert!(canvas.text_blocks().is_empty());
    }

    #[test]
    fn test_non_bmp_in_comment_is_replaced() {
        let canvas = render(Some("<p>nice job 🎉</p>"));
        assert_eq!(canvas.lines(), vec!["nice job \u{fffd}"]);
    }
}
