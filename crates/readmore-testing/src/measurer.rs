//! A deterministic fixed-advance [`TextMeasurer`].

use readmore_ui_layout::{
    CaretStop, LineMetrics, ResolvedTextDirection, TextLayoutInput, TextLayoutResult,
    TextMeasurer, TextStyle, ELLIPSIS,
};
use std::cell::Cell;
use std::ops::Range;

/// Lays out text on a monospace grid so tests can compute expected breaks by
/// hand.
///
/// * every char advances `advance + letter_spacing` pixels, lines are
///   `line_height` tall (the style's line height wins when set);
/// * soft wrapping is greedy at word boundaries; trailing spaces hang past the
///   line end and a word longer than the line is broken between chars;
/// * `\n` ends a paragraph. A paragraph whose first strong char is Hebrew or
///   Arabic is right-to-left and right-aligned within the layout width.
#[derive(Clone, Debug)]
pub struct MonospaceMeasurer {
    advance: f32,
    line_height: f32,
    ellipsis_glyph: bool,
    calls: Cell<usize>,
}

impl MonospaceMeasurer {
    pub const DEFAULT_ADVANCE: f32 = 10.0;
    pub const DEFAULT_LINE_HEIGHT: f32 = 20.0;

    pub fn new() -> Self {
        Self {
            advance: Self::DEFAULT_ADVANCE,
            line_height: Self::DEFAULT_LINE_HEIGHT,
            ellipsis_glyph: true,
            calls: Cell::new(0),
        }
    }

    pub fn with_advance(mut self, advance: f32) -> Self {
        self.advance = advance;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Simulates a font without `…`.
    pub fn with_ellipsis_glyph(mut self, available: bool) -> Self {
        self.ellipsis_glyph = available;
        self
    }

    /// Number of [`TextMeasurer::measure`] calls so far.
    pub fn measure_calls(&self) -> usize {
        self.calls.get()
    }

    pub fn reset_measure_calls(&self) {
        self.calls.set(0);
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct Row {
    start: usize,
    end: usize,
    visible_end: usize,
    /// Offset of every char on the row, line feed included.
    offsets: Vec<usize>,
    visible_columns: usize,
    direction: ResolvedTextDirection,
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, input: &TextLayoutInput<'_>) -> TextLayoutResult {
        self.calls.set(self.calls.get() + 1);
        let text = input.text;
        let advance = self.advance + input.style.letter_spacing.unwrap_or(0.0);
        let line_height = input.style.line_height.unwrap_or(self.line_height);
        let max_columns = (input.soft_wrap && input.has_bounded_width() && advance > 0.0)
            .then(|| ((input.max_width / advance) + 1e-3).floor().max(1.0) as usize);

        let mut rows = Vec::new();
        let mut paragraph_start = 0;
        loop {
            let line_feed = text[paragraph_start..]
                .find('\n')
                .map(|index| paragraph_start + index);
            let content_end = line_feed.unwrap_or(text.len());
            let direction = first_strong_direction(&text[paragraph_start..content_end]);
            wrap_paragraph(
                text,
                paragraph_start..content_end,
                max_columns,
                direction,
                &mut rows,
            );
            let Some(line_feed) = line_feed else {
                break;
            };
            if let Some(row) = rows.last_mut() {
                row.offsets.push(line_feed);
                row.end = line_feed + 1;
            }
            paragraph_start = line_feed + 1;
        }

        let exceeded_max_lines = !input.max_lines.allows(rows.len());
        if let Some(limit) = input.max_lines.limit() {
            rows.truncate(limit);
        }

        let container_width = if input.has_bounded_width() {
            input.max_width
        } else {
            rows.iter()
                .map(|row| row.visible_columns as f32 * advance)
                .fold(0.0, f32::max)
        };
        let caret_x = |row: &Row, column: usize| match row.direction {
            ResolvedTextDirection::Ltr => column as f32 * advance,
            ResolvedTextDirection::Rtl => container_width - column as f32 * advance,
        };

        let mut carets = Vec::new();
        let mut lines = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            carets.extend(row.offsets.iter().enumerate().map(|(column, offset)| CaretStop {
                offset: *offset,
                x: caret_x(row, column),
            }));
            let width = row.visible_columns as f32 * advance;
            lines.push(LineMetrics {
                start: row.start,
                end: row.end,
                visible_end: row.visible_end,
                left: match row.direction {
                    ResolvedTextDirection::Ltr => 0.0,
                    ResolvedTextDirection::Rtl => container_width - width,
                },
                width,
                top: index as f32 * line_height,
                bottom: (index + 1) as f32 * line_height,
                direction: row.direction,
            });
        }
        if let Some(last) = rows.last() {
            carets.push(CaretStop {
                offset: last.end,
                x: caret_x(last, last.offsets.len()),
            });
        }

        TextLayoutResult::new(
            text.len(),
            lines,
            carets,
            container_width,
            exceeded_max_lines,
        )
    }

    fn has_glyph(&self, ch: char, _style: &TextStyle) -> bool {
        ch != ELLIPSIS || self.ellipsis_glyph
    }
}

fn wrap_paragraph(
    text: &str,
    range: Range<usize>,
    max_columns: Option<usize>,
    direction: ResolvedTextDirection,
    rows: &mut Vec<Row>,
) {
    let chars: Vec<(usize, char)> = text[range.clone()]
        .char_indices()
        .map(|(index, ch)| (range.start + index, ch))
        .collect();
    if chars.is_empty() {
        rows.push(Row {
            start: range.start,
            end: range.end,
            visible_end: range.start,
            offsets: Vec::new(),
            visible_columns: 0,
            direction,
        });
        return;
    }

    let mut line_start = 0;
    while line_start < chars.len() {
        let mut line_end = chars.len();
        if let Some(max_columns) = max_columns {
            let mut last_break = None;
            for index in line_start..chars.len() {
                if chars[index].1.is_whitespace() {
                    continue;
                }
                if index > line_start && chars[index - 1].1.is_whitespace() {
                    last_break = Some(index);
                }
                if index - line_start + 1 > max_columns {
                    line_end = last_break.unwrap_or(index);
                    break;
                }
            }
        }

        let row_chars = &chars[line_start..line_end];
        let visible_columns = row_chars
            .iter()
            .rposition(|(_, ch)| !ch.is_whitespace())
            .map_or(0, |last| last + 1);
        let start = row_chars[0].0;
        rows.push(Row {
            start,
            end: chars.get(line_end).map_or(range.end, |(offset, _)| *offset),
            visible_end: row_chars
                .get(visible_columns.wrapping_sub(1))
                .map_or(start, |(offset, ch)| offset + ch.len_utf8()),
            offsets: row_chars.iter().map(|(offset, _)| *offset).collect(),
            visible_columns,
            direction,
        });
        line_start = line_end;
    }
}

fn is_rtl_char(ch: char) -> bool {
    matches!(ch as u32, 0x0590..=0x08FF | 0xFB1D..=0xFDFF | 0xFE70..=0xFEFF)
}

fn first_strong_direction(paragraph: &str) -> ResolvedTextDirection {
    for ch in paragraph.chars() {
        if is_rtl_char(ch) {
            return ResolvedTextDirection::Rtl;
        }
        if ch.is_alphabetic() {
            return ResolvedTextDirection::Ltr;
        }
    }
    ResolvedTextDirection::Ltr
}
