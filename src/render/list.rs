//! Recursive list rendering with indentation and local numbering.
//!
//! Each list level keeps its own counter; nested lists restart at 1 and
//! never continue a parent's count. Lines come out depth-first: an item's
//! own line first, then its nested lists' lines.

use crate::error::Result;
use crate::model::{BlockKind, MarkupNode};
use crate::render::emitter::{Align, Canvas, Emitter, TextStyle};
use crate::render::sanitize::sanitize;

/// Bullet token policy for one list level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletStyle {
    /// `•` for unordered lists.
    Bullet,
    /// `{n}.`, 1-based, reset per list, for ordered lists.
    Numbered,
}

impl BulletStyle {
    fn token(self, index: usize) -> String {
        match self {
            BulletStyle::Bullet => "\u{2022}".to_string(),
            BulletStyle::Numbered => format!("{index}."),
        }
    }

    fn for_list(kind: BlockKind) -> BulletStyle {
        match kind {
            BlockKind::OrderedList => BulletStyle::Numbered,
            _ => BulletStyle::Bullet,
        }
    }
}

/// Spacer unit repeated per indent level.
const INDENT_UNIT: &str = "    ";

/// Font size for list lines.
const LIST_SIZE: u8 = 10;

/// Render the items of one list at the given indent level.
///
/// `items` are the children of a list block; anything that is not a
/// `ListItem` was already filtered out by the parser.
pub fn render_items<C: Canvas>(
    items: &[MarkupNode],
    bullet: BulletStyle,
    indent: usize,
    emitter: &mut Emitter<C>,
) -> Result<()> {
    let mut index = 0usize;
    for item in items {
        let MarkupNode::ListItem(children) = item else {
            continue;
        };
        index += 1;
        render_item(children, bullet, index, indent, emitter)?;
    }
    Ok(())
}

/// Render a single item: its own joined line, then nested lists.
fn render_item<C: Canvas>(
    children: &[MarkupNode],
    bullet: BulletStyle,
    index: usize,
    indent: usize,
    emitter: &mut Emitter<C>,
) -> Result<()> {
    let mut content: Vec<String> = Vec::new();
    let mut nested: Vec<(BlockKind, &[MarkupNode])> = Vec::new();

    for child in children {
        match child {
            MarkupNode::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    content.push(sanitize(Some(text)));
                }
            }
            MarkupNode::Block { kind, children } if kind.is_list() => {
                nested.push((*kind, children.as_slice()));
            }
            // Direct inline content (paragraphs, spans, styled runs) joins
            // the item line; its own styling is not preserved.
            other => {
                let text = other.flatten_text();
                if !text.is_empty() {
                    content.push(sanitize(Some(text.as_str())));
                }
            }
        }
    }

    // An item with nothing at all renders nothing, not a bare bullet.
    if !content.is_empty() {
        let line = format!(
            "{}{} {}",
            INDENT_UNIT.repeat(indent),
            bullet.token(index),
            content.join(" ")
        );
        emitter.set_style(TextStyle::sized(LIST_SIZE));
        emitter.emit(line.trim_end(), Align::Left)?;
    }

    for (kind, items) in nested {
        render_items(items, BulletStyle::for_list(kind), indent + 1, emitter)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markup;
    use crate::render::RecordingCanvas;

    fn render_lists(markup: &str) -> RecordingCanvas {
        let tree = parse_markup(markup).unwrap();
        let mut canvas = RecordingCanvas::default();
        let mut emitter = Emitter::new(&mut canvas);
        for node in &tree.nodes {
            let MarkupNode::Block { kind, children } = node else {
                panic!("expected list block");
            };
            render_items(children, BulletStyle::for_list(*kind), 0, &mut emitter).unwrap();
        }
        canvas
    }

    #[test]
    fn test_flat_unordered_list() {
        let canvas = render_lists("<ul><li>alpha</li><li>beta</li></ul>");
        assert_eq!(canvas.lines(), vec!["\u{2022} alpha", "\u{2022} beta"]);
    }

    #[test]
    fn test_numbering_is_local_to_each_level() {
        let canvas = render_lists(
            "<ol>\
               <li>outer one</li>\
               <li>outer two<ol><li>inner one</li><li>inner two</li></ol></li>\
               <li>outer three</li>\
             </ol>",
        );
        assert_eq!(
            canvas.lines(),
            vec![
                "1. outer one",
                "2. outer two",
                "    1. inner one",
                "    2. inner two",
                "3. outer three",
            ]
        );
    }

    #[test]
    fn test_mixed_nesting_bullet_inside_numbered() {
        let canvas = render_lists(
            "<ol><li>step<ul><li>detail a</li><li>detail b</li></ul></li></ol>",
        );
        assert_eq!(
            canvas.lines(),
            vec!["1. step", "    \u{2022} detail a", "    \u{2022} detail b"]
        );
    }

    #[test]
    fn test_empty_item_contributes_nothing() {
        let canvas = render_lists("<ul><li>kept</li><li></li><li>also kept</li></ul>");
        assert_eq!(canvas.lines(), vec!["\u{2022} kept", "\u{2022} also kept"]);
    }

    #[test]
    fn test_item_with_only_nested_list_has_no_bare_bullet() {
        let canvas =
            render_lists("<ul><li><ul><li>only nested</li></ul></li></ul>");
        assert_eq!(canvas.lines(), vec!["    \u{2022} only nested"]);
    }

    #[test]
    fn test_inline_content_joined_into_one_line() {
        let canvas = render_lists(
            "<ul><li><p>first part</p><span>second part</span></li></ul>",
        );
        assert_eq!(canvas.lines(), vec!["\u{2022} first part second part"]);
    }

    #[test]
    fn test_deep_nesting_indent_grows() {
        let canvas = render_lists(
            "<ul><li>l0<ul><li>l1<ul><li>l2</li></ul></li></ul></li></ul>",
        );
        assert_eq!(
            canvas.lines(),
            vec![
                "\u{2022} l0",
                "    \u{2022} l1",
                "        \u{2022} l2",
            ]
        );
    }

    #[test]
    fn test_list_lines_use_small_fixed_size() {
        let canvas = render_lists("<ul><li>item</li></ul>");
        let blocks = canvas.text_blocks();
        assert_eq!(blocks[0].style.size, LIST_SIZE);
        assert!(!blocks[0].style.bold && !blocks[0].style.italic);
    }
}
