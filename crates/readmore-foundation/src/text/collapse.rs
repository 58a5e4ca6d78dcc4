//! Collapsed text resolution.
//!
//! Given text that overflows its collapsed line cap, find the longest prefix
//! such that `prefix + "… " + action` still ends on the last allowed line.
//!
//! # Algorithm
//! 1. Measure the text capped at the collapsed line count. If the last line
//!    already ends at the end of the text, nothing needs collapsing.
//! 2. Start at the visible end of the last line and walk backwards one
//!    character at a time until the caret leaves room for the action
//!    fragment: the caret's right edge for left-to-right paragraphs, its left
//!    edge for right-to-left ones.
//! 3. Drop trailing whitespace, append the ellipsis, a space and the colored
//!    action.
//! 4. Re-measure the composed string and delete characters in front of the
//!    action while it still needs more lines than allowed. Metric rounding
//!    between the capped and unconstrained passes occasionally needs this.

use super::{AnnotatedString, SpanStyle};
use readmore_ui_graphics::Color;
use readmore_ui_layout::{
    ResolvedTextDirection, TextLayoutInput, TextLayoutResult, TextMeasurer, TextStyle, ELLIPSIS,
};

/// Inputs of one collapse resolution.
#[derive(Clone, Copy, Debug)]
pub struct CollapseRequest<'a> {
    pub original_text: &'a str,
    pub available_width: f32,
    pub collapsed_max_lines: usize,
    pub expand_action: &'a str,
    pub action_color: Color,
    pub style: &'a TextStyle,
    pub soft_wrap: bool,
}

impl<'a> CollapseRequest<'a> {
    pub fn new(original_text: &'a str, available_width: f32, style: &'a TextStyle) -> Self {
        Self {
            original_text,
            available_width,
            collapsed_max_lines: 3,
            expand_action: "",
            action_color: Color::PURPLE,
            style,
            soft_wrap: true,
        }
    }

    pub fn with_collapsed_max_lines(mut self, lines: usize) -> Self {
        self.collapsed_max_lines = lines;
        self
    }

    pub fn with_expand_action(mut self, action: &'a str, color: Color) -> Self {
        self.expand_action = action;
        self.action_color = color;
        self
    }

    pub fn with_soft_wrap(mut self, soft_wrap: bool) -> Self {
        self.soft_wrap = soft_wrap;
        self
    }
}

/// How the collapsed representation differs from the original text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Truncation {
    /// The text fits within the collapsed cap and is shown verbatim.
    None,
    /// A prefix of the text followed by the ellipsis and the action.
    WithAction,
    /// Only the ellipsis and the action fit.
    ActionOnly,
    /// The font cannot render the ellipsis; the capped text is shown as is.
    CappedWithoutAction,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CollapsedText {
    text: AnnotatedString,
    truncation: Truncation,
}

impl CollapsedText {
    /// The untouched original text.
    pub fn unchanged(original_text: &str) -> Self {
        Self {
            text: AnnotatedString::new(original_text),
            truncation: Truncation::None,
        }
    }

    pub fn text(&self) -> &AnnotatedString {
        &self.text
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn truncation(&self) -> Truncation {
        self.truncation
    }

    pub fn is_truncated(&self) -> bool {
        self.truncation != Truncation::None
    }

    pub fn into_text(self) -> AnnotatedString {
        self.text
    }
}

/// The fragment appended to collapsed text: ellipsis, space, action.
pub fn action_fragment(expand_action: &str) -> String {
    format!("{ELLIPSIS} {expand_action}")
}

/// Layout of the original text capped at the collapsed line count.
pub fn measure_collapsed_layout<M: TextMeasurer + ?Sized>(
    measurer: &M,
    request: &CollapseRequest<'_>,
) -> TextLayoutResult {
    measurer.measure(
        &TextLayoutInput::new(
            request.original_text,
            request.style,
            request.available_width,
        )
        .with_max_lines(request.collapsed_max_lines)
        .with_soft_wrap(request.soft_wrap),
    )
}

/// Width of the action fragment laid out on one unconstrained line.
pub fn measure_action_width<M: TextMeasurer + ?Sized>(
    measurer: &M,
    request: &CollapseRequest<'_>,
) -> f32 {
    let fragment = action_fragment(request.expand_action);
    measurer
        .measure(
            &TextLayoutInput::unconstrained(&fragment, request.style)
                .with_max_lines(1)
                .with_soft_wrap(request.soft_wrap),
        )
        .size()
        .width
}

/// Measures and resolves the collapsed representation of `request.original_text`.
pub fn resolve_collapsed_text<M: TextMeasurer + ?Sized>(
    measurer: &M,
    request: &CollapseRequest<'_>,
) -> CollapsedText {
    if !(request.available_width > 0.0) {
        log::debug!(
            "collapse skipped: no usable width ({})",
            request.available_width
        );
        return CollapsedText::unchanged(request.original_text);
    }
    let collapsed_layout = measure_collapsed_layout(measurer, request);
    if fits_within_cap(&collapsed_layout, request.original_text) {
        return CollapsedText::unchanged(request.original_text);
    }
    let action_width = measure_action_width(measurer, request);
    collapse_layout(measurer, request, &collapsed_layout, action_width)
}

/// Resolves the collapsed representation from measurements the caller holds.
///
/// `collapsed_layout` must come from [`measure_collapsed_layout`] and
/// `action_width` from [`measure_action_width`] for the same request.
pub fn collapse_layout<M: TextMeasurer + ?Sized>(
    measurer: &M,
    request: &CollapseRequest<'_>,
    collapsed_layout: &TextLayoutResult,
    action_width: f32,
) -> CollapsedText {
    let original = request.original_text;
    let Some(last_line) = collapsed_layout.last_line() else {
        return CollapsedText::unchanged(original);
    };
    if fits_within_cap(collapsed_layout, original) {
        return CollapsedText::unchanged(original);
    }

    // on some fonts the ellipsis can't be rendered; keep the capped text so
    // the control can still be expanded
    if !measurer.has_glyph(ELLIPSIS, request.style) {
        log::warn!("active font has no ellipsis glyph; collapsing without expand action");
        let visible_end = floor_char_boundary(original, last_line.visible_end);
        return CollapsedText {
            text: AnnotatedString::new(&original[..visible_end]),
            truncation: Truncation::CappedWithoutAction,
        };
    }

    let cut = find_cut_offset(collapsed_layout, request, action_width);
    let mut prefix = original[..cut].trim_end().to_string();
    let text = trim_until_fits(measurer, request, &mut prefix);
    let truncation = if prefix.is_empty() {
        Truncation::ActionOnly
    } else {
        Truncation::WithAction
    };
    CollapsedText { text, truncation }
}

fn fits_within_cap(layout: &TextLayoutResult, original: &str) -> bool {
    layout
        .last_line()
        .map_or(true, |line| line.end >= original.len())
}

/// Largest offset on the last line whose caret leaves room for the action.
fn find_cut_offset(
    layout: &TextLayoutResult,
    request: &CollapseRequest<'_>,
    action_width: f32,
) -> usize {
    let text = request.original_text;
    let Some(last_line) = layout.last_line() else {
        return 0;
    };
    let mut cut = floor_char_boundary(text, last_line.visible_end);
    let available = request.available_width;

    match layout.paragraph_direction(previous_char_boundary(text, cut)) {
        ResolvedTextDirection::Ltr => {
            let limit = (available - action_width).max(0.0);
            while cut > 0 && layout.cursor_rect(cut).right() > limit {
                cut = previous_char_boundary(text, cut);
            }
        }
        ResolvedTextDirection::Rtl => {
            let limit = action_width.min(available);
            while cut > 0 && layout.cursor_rect(cut).left() < limit {
                cut = previous_char_boundary(text, cut);
            }
        }
    }
    cut
}

/// Composes `prefix + "… " + action`, deleting characters in front of the
/// action while the composition needs more lines than allowed.
fn trim_until_fits<M: TextMeasurer + ?Sized>(
    measurer: &M,
    request: &CollapseRequest<'_>,
    prefix: &mut String,
) -> AnnotatedString {
    let mut removed = 0usize;
    loop {
        let composed = compose(prefix, request);
        let layout = measurer.measure(
            &TextLayoutInput::new(composed.as_str(), request.style, request.available_width)
                .with_soft_wrap(request.soft_wrap),
        );
        if layout.line_count() <= request.collapsed_max_lines || prefix.pop().is_none() {
            if removed > 0 {
                log::debug!("collapsed text trimmed by {removed} chars to fit the line cap");
            }
            return composed;
        }
        removed += 1;
    }
}

fn compose(prefix: &str, request: &CollapseRequest<'_>) -> AnnotatedString {
    let mut builder = AnnotatedString::builder();
    builder
        .append(prefix)
        .append_char(ELLIPSIS)
        .append_char(' ')
        .with_style(SpanStyle::color(request.action_color), |b| {
            b.append(request.expand_action);
        });
    builder.build()
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn previous_char_boundary(text: &str, offset: usize) -> usize {
    text[..floor_char_boundary(text, offset)]
        .char_indices()
        .next_back()
        .map_or(0, |(index, _)| index)
}
