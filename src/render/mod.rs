//! Rendering: sanitizing, walking markup trees and emitting paginated text.

mod emitter;
mod list;
mod recording;
mod sanitize;
mod walker;

pub use emitter::{Align, Canvas, Emitter, RenderState, TextStyle};
pub use list::{render_items, BulletStyle};
pub use recording::{CanvasOp, RecordingCanvas, TextBlock};
pub use sanitize::{sanitize, NO_TEXT_SENTINEL};
pub use walker::{render_comment, render_node, NO_COMMENT_PLACEHOLDER};
