use readmore_ui_graphics::Color;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    SansSerif,
    Serif,
    Monospace,
    Named(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const BOLD: FontWeight = FontWeight(700);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextDecoration {
    None,
    Underline,
    LineThrough,
}

/// Typography passed opaquely to the [`crate::TextMeasurer`] and to rendering.
///
/// Every field is optional; `None` means "inherit". [`TextStyle::merge`]
/// layers a more specific style on top of a base one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextStyle {
    pub color: Option<Color>,
    pub font_size: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub font_family: Option<FontFamily>,
    pub letter_spacing: Option<f32>,
    pub line_height: Option<f32>,
    pub text_decoration: Option<TextDecoration>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    pub fn with_font_family(mut self, family: FontFamily) -> Self {
        self.font_family = Some(family);
        self
    }

    pub fn with_letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = Some(spacing);
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn with_text_decoration(mut self, decoration: TextDecoration) -> Self {
        self.text_decoration = Some(decoration);
        self
    }

    /// Returns a new style where every field set on `other` wins over `self`.
    pub fn merge(&self, other: &TextStyle) -> TextStyle {
        TextStyle {
            color: other.color.or(self.color),
            font_size: other.font_size.or(self.font_size),
            font_weight: other.font_weight.or(self.font_weight),
            font_style: other.font_style.or(self.font_style),
            font_family: other
                .font_family
                .clone()
                .or_else(|| self.font_family.clone()),
            letter_spacing: other.letter_spacing.or(self.letter_spacing),
            line_height: other.line_height.or(self.line_height),
            text_decoration: other.text_decoration.or(self.text_decoration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_specified_fields_of_other() {
        let base = TextStyle::new()
            .with_font_size(14.0)
            .with_font_weight(FontWeight::NORMAL)
            .with_color(Color::BLACK);
        let overlay = TextStyle::new()
            .with_font_weight(FontWeight::BOLD)
            .with_line_height(20.0);

        let merged = base.merge(&overlay);
        assert_eq!(merged.font_size, Some(14.0));
        assert_eq!(merged.font_weight, Some(FontWeight::BOLD));
        assert_eq!(merged.line_height, Some(20.0));
        assert_eq!(merged.color, Some(Color::BLACK));
    }
}
