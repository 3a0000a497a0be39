//! Underlined paragraph element for the PDF backend.
//!
//! The backend's style model covers regular/bold/italic variants only, so
//! underline is drawn here: the element wraps its text greedily to the
//! area width, prints each line and draws the rule underneath it.

use genpdf::fonts::FontCache;
use genpdf::style::Style;
use genpdf::{Context, Element, Position, RenderResult, Size};

/// A left-aligned, wrapped paragraph rendered with an underline rule.
pub struct UnderlinedParagraph {
    words: Vec<String>,
    /// Words already rendered on previous pages.
    offset: usize,
}

impl UnderlinedParagraph {
    /// Create an underlined paragraph from plain text.
    pub fn new(text: impl Into<String>) -> Self {
        UnderlinedParagraph {
            words: text
                .into()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            offset: 0,
        }
    }

    /// Greedily fill one line starting at `self.offset`.
    fn fill_line(&self, font_cache: &FontCache, style: Style, max_width: f64) -> (String, f64, usize) {
        let mut line = self.words[self.offset].clone();
        let mut width: f64 = style.str_width(font_cache, &line).into();
        let space: f64 = style.str_width(font_cache, " ").into();
        let mut next = self.offset + 1;
        while next < self.words.len() {
            let word_width: f64 = style.str_width(font_cache, &self.words[next]).into();
            if width + space + word_width > max_width {
                break;
            }
            line.push(' ');
            line.push_str(&self.words[next]);
            width += space + word_width;
            next += 1;
        }
        (line, width, next)
    }
}

impl Element for UnderlinedParagraph {
    fn render(
        &mut self,
        context: &Context,
        area: genpdf::render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, genpdf::error::Error> {
        let mut result = RenderResult::default();
        if self.words.is_empty() {
            return Ok(result);
        }

        let line_height: f64 = style.line_height(&context.font_cache).into();
        let max_width: f64 = area.size().width.into();
        let max_height: f64 = area.size().height.into();
        let mut y = 0.0;

        while self.offset < self.words.len() {
            if y + line_height > max_height {
                result.has_more = true;
                break;
            }
            let (line, width, next) = self.fill_line(&context.font_cache, style, max_width);
            area.print_str(&context.font_cache, Position::new(0.0, y), style, line.as_str())?;
            // Rule sits just below the baseline.
            let rule_y = y + line_height * 0.85;
            area.draw_line(
                vec![Position::new(0.0, rule_y), Position::new(width, rule_y)],
                Style::new(),
            );
            y += line_height;
            self.offset = next;
        }

        result.size = Size::new(max_width, y);
        Ok(result)
    }
}
