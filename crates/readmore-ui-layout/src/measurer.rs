use crate::{TextLayoutInput, TextLayoutResult, TextStyle};
use std::rc::Rc;

/// The horizontal ellipsis appended to collapsed text.
pub const ELLIPSIS: char = '\u{2026}';

/// Shaping engine capability consumed by the collapse resolver and the
/// expandable text state machine.
///
/// Implementations must be deterministic: measuring the same input twice
/// yields equal results.
pub trait TextMeasurer {
    /// Lays out `input.text`, breaking lines at `input.max_width` and keeping
    /// at most `input.max_lines` lines.
    fn measure(&self, input: &TextLayoutInput<'_>) -> TextLayoutResult;

    /// Whether the active font can render `ch`. Fonts without an ellipsis
    /// glyph make the resolver fall back to plain capped text.
    fn has_glyph(&self, _ch: char, _style: &TextStyle) -> bool {
        true
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, input: &TextLayoutInput<'_>) -> TextLayoutResult {
        (**self).measure(input)
    }

    fn has_glyph(&self, ch: char, style: &TextStyle) -> bool {
        (**self).has_glyph(ch, style)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Rc<T> {
    fn measure(&self, input: &TextLayoutInput<'_>) -> TextLayoutResult {
        (**self).measure(input)
    }

    fn has_glyph(&self, ch: char, style: &TextStyle) -> bool {
        (**self).has_glyph(ch, style)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn measure(&self, input: &TextLayoutInput<'_>) -> TextLayoutResult {
        (**self).measure(input)
    }

    fn has_glyph(&self, ch: char, style: &TextStyle) -> bool {
        (**self).has_glyph(ch, style)
    }
}
