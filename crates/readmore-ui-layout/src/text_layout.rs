use crate::{MaxLines, TextStyle};
use readmore_ui_graphics::{Rect, Size};
use smallvec::SmallVec;

/// Paragraph direction as resolved by the shaping engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ResolvedTextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Everything a [`crate::TextMeasurer`] needs to lay out one paragraph.
///
/// `max_width` is `f32::INFINITY` for unconstrained measurement.
#[derive(Clone, Copy, Debug)]
pub struct TextLayoutInput<'a> {
    pub text: &'a str,
    pub style: &'a TextStyle,
    pub max_width: f32,
    pub max_lines: MaxLines,
    pub soft_wrap: bool,
}

impl<'a> TextLayoutInput<'a> {
    pub fn new(text: &'a str, style: &'a TextStyle, max_width: f32) -> Self {
        Self {
            text,
            style,
            max_width,
            max_lines: MaxLines::Unbounded,
            soft_wrap: true,
        }
    }

    /// Unbounded width, used for fragments that must stay on one line.
    pub fn unconstrained(text: &'a str, style: &'a TextStyle) -> Self {
        Self::new(text, style, f32::INFINITY)
    }

    pub fn with_max_lines(mut self, max_lines: impl Into<MaxLines>) -> Self {
        self.max_lines = max_lines.into();
        self
    }

    pub fn with_soft_wrap(mut self, soft_wrap: bool) -> Self {
        self.soft_wrap = soft_wrap;
        self
    }

    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }
}

/// Geometry of one rendered line.
///
/// Offsets are UTF-8 byte offsets into the measured text and always fall on
/// `char` boundaries. `visible_end` excludes trailing whitespace, line feeds
/// and any ellipsized tail the measurer hid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub start: usize,
    pub end: usize,
    pub visible_end: usize,
    pub left: f32,
    pub width: f32,
    pub top: f32,
    pub bottom: f32,
    pub direction: ResolvedTextDirection,
}

impl LineMetrics {
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Horizontal caret position in front of the character starting at `offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaretStop {
    pub offset: usize,
    pub x: f32,
}

/// Immutable result of one measurement call.
///
/// Measurers report one [`CaretStop`] for every char boundary in
/// `start..end` of each rendered line, plus one for the end of the last line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayoutResult {
    text_len: usize,
    lines: SmallVec<[LineMetrics; 4]>,
    carets: Vec<CaretStop>,
    size: Size,
    exceeded_max_lines: bool,
}

impl TextLayoutResult {
    pub fn new(
        text_len: usize,
        lines: impl IntoIterator<Item = LineMetrics>,
        mut carets: Vec<CaretStop>,
        width: f32,
        exceeded_max_lines: bool,
    ) -> Self {
        let lines: SmallVec<[LineMetrics; 4]> = lines.into_iter().collect();
        carets.sort_by_key(|caret| caret.offset);
        let height = lines.last().map_or(0.0, |line| line.bottom);
        Self {
            text_len,
            lines,
            carets,
            size: Size::new(width, height),
            exceeded_max_lines,
        }
    }

    /// Result for an empty paragraph.
    pub fn empty(width: f32) -> Self {
        Self::new(0, [], Vec::new(), width, false)
    }

    pub fn text_len(&self) -> usize {
        self.text_len
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[LineMetrics] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&LineMetrics> {
        self.lines.get(index)
    }

    pub fn last_line(&self) -> Option<&LineMetrics> {
        self.lines.last()
    }

    pub fn line_start(&self, index: usize) -> Option<usize> {
        self.line(index).map(|line| line.start)
    }

    /// End offset of a line; with `visible_end` trailing whitespace is excluded.
    pub fn line_end(&self, index: usize, visible_end: bool) -> Option<usize> {
        self.line(index).map(|line| {
            if visible_end {
                line.visible_end
            } else {
                line.end
            }
        })
    }

    pub fn line_width(&self, index: usize) -> Option<f32> {
        self.line(index).map(|line| line.width)
    }

    /// True when the measurer dropped lines to honour `max_lines`.
    pub fn did_exceed_max_lines(&self) -> bool {
        self.exceeded_max_lines
    }

    /// Line holding `offset`. A boundary shared by two lines belongs to the
    /// later one; offsets past the laid-out text map to the last line.
    pub fn line_for_offset(&self, offset: usize) -> Option<usize> {
        if self.lines.is_empty() {
            return None;
        }
        let after = self.lines.partition_point(|line| line.start <= offset);
        Some(after.saturating_sub(1))
    }

    pub fn paragraph_direction(&self, offset: usize) -> ResolvedTextDirection {
        self.line_for_offset(offset)
            .and_then(|index| self.line(index))
            .map(|line| line.direction)
            .unwrap_or_default()
    }

    /// Zero-width caret rectangle in front of `offset`.
    pub fn cursor_rect(&self, offset: usize) -> Rect {
        let Some(line) = self.line_for_offset(offset).and_then(|index| self.line(index)) else {
            return Rect::default();
        };
        let x = self
            .caret_x(offset)
            .filter(|(stop_offset, _)| *stop_offset >= line.start)
            .map(|(_, x)| x)
            .unwrap_or(match line.direction {
                ResolvedTextDirection::Ltr => line.left,
                ResolvedTextDirection::Rtl => line.right(),
            });
        Rect::new(x, line.top, 0.0, line.height())
    }

    fn caret_x(&self, offset: usize) -> Option<(usize, f32)> {
        let after = self.carets.partition_point(|caret| caret.offset <= offset);
        let stop = self.carets.get(after.checked_sub(1)?)?;
        Some((stop.offset, stop.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start: usize, end: usize, index: usize, direction: ResolvedTextDirection) -> LineMetrics {
        LineMetrics {
            start,
            end,
            visible_end: end,
            left: 0.0,
            width: (end - start) as f32 * 10.0,
            top: index as f32 * 20.0,
            bottom: (index + 1) as f32 * 20.0,
            direction,
        }
    }

    fn two_line_layout() -> TextLayoutResult {
        let carets = (0..=8)
            .map(|offset| CaretStop {
                offset,
                x: (offset % 4) as f32 * 10.0,
            })
            .collect();
        TextLayoutResult::new(
            8,
            [
                line(0, 4, 0, ResolvedTextDirection::Ltr),
                line(4, 8, 1, ResolvedTextDirection::Rtl),
            ],
            carets,
            40.0,
            false,
        )
    }

    #[test]
    fn shared_boundary_belongs_to_later_line() {
        let layout = two_line_layout();
        assert_eq!(layout.line_for_offset(3), Some(0));
        assert_eq!(layout.line_for_offset(4), Some(1));
        assert_eq!(layout.line_for_offset(100), Some(1));
    }

    #[test]
    fn cursor_rect_uses_caret_stop_and_line_box() {
        let layout = two_line_layout();
        let rect = layout.cursor_rect(6);
        assert_eq!(rect, Rect::new(20.0, 20.0, 0.0, 20.0));
        assert_eq!(layout.paragraph_direction(6), ResolvedTextDirection::Rtl);
        assert_eq!(layout.paragraph_direction(1), ResolvedTextDirection::Ltr);
    }

    #[test]
    fn size_height_comes_from_last_line() {
        let layout = two_line_layout();
        assert_eq!(layout.size(), Size::new(40.0, 40.0));
        assert_eq!(layout.line_end(1, true), Some(8));
        assert_eq!(layout.line_end(2, true), None);
    }

    #[test]
    fn empty_layout_has_no_lines() {
        let layout = TextLayoutResult::empty(100.0);
        assert_eq!(layout.line_count(), 0);
        assert_eq!(layout.cursor_rect(0), Rect::default());
        assert_eq!(layout.paragraph_direction(0), ResolvedTextDirection::Ltr);
    }
}
