use readmore_ui_graphics::Color;
use readmore_ui_layout::{FontWeight, TextDecoration};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Range;

/// Character-level styling applied over a byte range of an [`AnnotatedString`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SpanStyle {
    pub color: Option<Color>,
    pub font_weight: Option<FontWeight>,
    pub text_decoration: Option<TextDecoration>,
}

impl SpanStyle {
    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyledRange {
    pub style: SpanStyle,
    pub range: Range<usize>,
}

/// Text with styled ranges. Ranges are byte offsets on `char` boundaries.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AnnotatedString {
    text: String,
    span_styles: SmallVec<[StyledRange; 2]>,
}

impl AnnotatedString {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span_styles: SmallVec::new(),
        }
    }

    pub fn builder() -> AnnotatedStringBuilder {
        AnnotatedStringBuilder::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn span_styles(&self) -> &[StyledRange] {
        &self.span_styles
    }

    /// Text covered by each span, in insertion order.
    pub fn styled_segments(&self) -> impl Iterator<Item = (&str, &SpanStyle)> {
        self.span_styles
            .iter()
            .filter_map(move |span| Some((self.text.get(span.range.clone())?, &span.style)))
    }
}

impl fmt::Display for AnnotatedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for AnnotatedString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for AnnotatedString {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl PartialEq<str> for AnnotatedString {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for AnnotatedString {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// Incremental builder mirroring `buildAnnotatedString { withStyle(..) { .. } }`.
#[derive(Debug, Default)]
pub struct AnnotatedStringBuilder {
    text: String,
    span_styles: SmallVec<[StyledRange; 2]>,
    open_styles: Vec<(SpanStyle, usize)>,
}

impl AnnotatedStringBuilder {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    pub fn append_char(&mut self, ch: char) -> &mut Self {
        self.text.push(ch);
        self
    }

    /// Opens a style covering everything appended until the matching [`Self::pop`].
    pub fn push_style(&mut self, style: SpanStyle) -> &mut Self {
        self.open_styles.push((style, self.text.len()));
        self
    }

    pub fn pop(&mut self) -> &mut Self {
        if let Some((style, start)) = self.open_styles.pop() {
            self.close_span(style, start);
        }
        self
    }

    pub fn with_style(&mut self, style: SpanStyle, content: impl FnOnce(&mut Self)) -> &mut Self {
        self.push_style(style);
        content(self);
        self.pop()
    }

    fn close_span(&mut self, style: SpanStyle, start: usize) {
        let end = self.text.len();
        if end > start {
            self.span_styles.push(StyledRange {
                style,
                range: start..end,
            });
        }
    }

    /// Finishes the string, closing any styles left open.
    pub fn build(mut self) -> AnnotatedString {
        while let Some((style, start)) = self.open_styles.pop() {
            self.close_span(style, start);
        }
        AnnotatedString {
            text: self.text,
            span_styles: self.span_styles,
        }
    }
}
