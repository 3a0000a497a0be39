//! Parser for the constrained rich-text markup found in response comments.
//!
//! The feedback-export pipeline produces a small, known HTML subset:
//! paragraphs, bold/italic/underline spans, and nested lists. The parser
//! is lenient about the usual export quirks (unclosed tags, stray end
//! tags, uppercase tag names, void elements) and never panics on them.

use log::warn;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;
use crate::model::{BlockKind, MarkupNode, MarkupTree};

/// Parse a raw markup string into a [`MarkupTree`].
///
/// A `<table>` element anywhere in the input sets
/// [`MarkupTree::contains_table`]; table rendering is unsupported and the
/// caller rejects the whole field.
pub fn parse_markup(input: &str) -> Result<MarkupTree> {
    let mut reader = Reader::from_str(input);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut stack: Vec<Frame> = vec![Frame::root()];
    let mut contains_table = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = local_tag(e.name().as_ref());
                break_text_run(&mut stack);
                if is_void(&tag) {
                    continue;
                }
                if tag == "table" {
                    contains_table = true;
                }
                stack.push(Frame::open(&tag));
            }
            Event::Empty(e) => {
                let tag = local_tag(e.name().as_ref());
                break_text_run(&mut stack);
                if is_void(&tag) || tag.is_empty() {
                    continue;
                }
                if tag == "table" {
                    contains_table = true;
                }
                // An empty element opens and closes in one event.
                let node = Frame::open(&tag).into_node();
                push_child(&mut stack, node);
            }
            Event::End(e) => {
                let tag = local_tag(e.name().as_ref());
                close_tag(&mut stack, &tag);
                break_text_run(&mut stack);
            }
            Event::Text(e) => {
                let text = decode_entities(&String::from_utf8_lossy(e.as_ref()));
                push_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                push_text(&mut stack, &text);
            }
            Event::GeneralRef(e) => {
                let name = String::from_utf8_lossy(e.as_ref()).into_owned();
                push_text(&mut stack, &resolve_entity(&name));
            }
            Event::Eof => break,
            // Comments, doctype, processing instructions carry no content.
            _ => {}
        }
    }

    // Close whatever the export left unclosed.
    while stack.len() > 1 {
        if let Some(frame) = stack.pop() {
            push_child(&mut stack, frame.into_node());
        }
    }

    let root = stack.pop().unwrap_or_else(Frame::root);
    Ok(MarkupTree {
        nodes: root.children,
        contains_table,
    })
}

/// An element currently being built.
struct Frame {
    /// Lowercased tag name; empty for the synthetic root.
    tag: String,
    children: Vec<MarkupNode>,
    /// True while the last child is a text run still being continued.
    /// Entity references split text events; those pieces merge back into
    /// one run, while any intervening element ends the run.
    text_run: bool,
}

impl Frame {
    fn root() -> Self {
        Frame::open("")
    }

    fn open(tag: &str) -> Self {
        Frame {
            tag: tag.to_string(),
            children: Vec::new(),
            text_run: false,
        }
    }

    fn into_node(self) -> MarkupNode {
        match self.tag.as_str() {
            "li" => MarkupNode::ListItem(self.children),
            tag => {
                let kind = block_kind(tag);
                let children = if kind.is_list() {
                    only_list_items(self.children, tag)
                } else {
                    self.children
                };
                MarkupNode::Block { kind, children }
            }
        }
    }
}

fn block_kind(tag: &str) -> BlockKind {
    match tag {
        "p" => BlockKind::Paragraph,
        "strong" | "b" => BlockKind::Bold,
        "em" | "i" => BlockKind::Italic,
        "u" => BlockKind::Underline,
        "ul" => BlockKind::UnorderedList,
        "ol" => BlockKind::OrderedList,
        _ => BlockKind::Unknown,
    }
}

/// List blocks contain only `ListItem` children. Exports occasionally put
/// stray whitespace or tags between items; drop anything that is not an
/// item, keeping the warning for non-blank content.
fn only_list_items(children: Vec<MarkupNode>, tag: &str) -> Vec<MarkupNode> {
    children
        .into_iter()
        .filter(|child| {
            if matches!(child, MarkupNode::ListItem(_)) {
                true
            } else {
                let stray = child.flatten_text();
                if !stray.is_empty() {
                    warn!("Dropping stray <{tag}> child that is not a list item: {stray:?}");
                }
                false
            }
        })
        .collect()
}

fn push_text(stack: &mut [Frame], text: &str) {
    let Some(top) = stack.last_mut() else {
        return;
    };
    if !top.text_run && text.trim().is_empty() {
        return;
    }
    if top.text_run {
        if let Some(MarkupNode::Text(existing)) = top.children.last_mut() {
            existing.push_str(text);
            return;
        }
    }
    top.children.push(MarkupNode::Text(text.to_string()));
    top.text_run = true;
}

fn break_text_run(stack: &mut [Frame]) {
    if let Some(top) = stack.last_mut() {
        top.text_run = false;
    }
}

fn push_child(stack: &mut Vec<Frame>, node: MarkupNode) {
    if let Some(top) = stack.last_mut() {
        top.children.push(node);
    }
}

/// Close the innermost open element matching `tag`, auto-closing anything
/// the export left open in between. Unmatched end tags are ignored.
fn close_tag(stack: &mut Vec<Frame>, tag: &str) {
    let Some(depth) = stack.iter().rposition(|f| f.tag == tag) else {
        return;
    };
    if depth == 0 {
        return;
    }
    while stack.len() > depth {
        if let Some(frame) = stack.pop() {
            push_child(stack, frame.into_node());
        }
    }
}

fn local_tag(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_ascii_lowercase()
}

/// Elements that never carry renderable children.
fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img" | "col" | "meta" | "link" | "input")
}

/// Resolve one general entity reference (the `name` between `&` and `;`).
fn resolve_entity(name: &str) -> String {
    match name {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        "nbsp" => "\u{a0}".to_string(),
        _ => {
            if let Some(code) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                if let Some(c) = u32::from_str_radix(code, 16).ok().and_then(char::from_u32) {
                    return c.to_string();
                }
            } else if let Some(code) = name.strip_prefix('#') {
                if let Some(c) = code.parse::<u32>().ok().and_then(char::from_u32) {
                    return c.to_string();
                }
            }
            warn!("Unknown entity reference: &{name};");
            format!("&{name};")
        }
    }
}

/// Decode entity references that appear inside a raw text event.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        // An entity name is short; anything else is a literal ampersand.
        match tail[1..].find(';').filter(|end| *end <= 8) {
            Some(end) => {
                out.push_str(&resolve_entity(&tail[1..end + 1]));
                rest = &tail[end + 2..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
