use crate::ConfigError;
use readmore_ui_graphics::Color;
use readmore_ui_layout::{MaxLines, TextStyle};

/// Immutable configuration snapshot of an [`crate::ExpandableText`].
///
/// Built with the `with_*` methods and checked by [`Self::validate`] when it
/// is applied. Invalid combinations are rejected, never clamped.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpandableTextConfig {
    pub collapsed_max_lines: usize,
    pub max_lines: MaxLines,
    pub expand_action: String,
    pub action_color: Color,
    pub style: TextStyle,
    pub soft_wrap: bool,
}

impl Default for ExpandableTextConfig {
    fn default() -> Self {
        Self {
            collapsed_max_lines: 3,
            max_lines: MaxLines::Unbounded,
            expand_action: String::new(),
            action_color: Color::PURPLE,
            style: TextStyle::default(),
            soft_wrap: true,
        }
    }
}

impl ExpandableTextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collapsed_max_lines(mut self, lines: usize) -> Self {
        self.collapsed_max_lines = lines;
        self
    }

    pub fn with_max_lines(mut self, max_lines: impl Into<MaxLines>) -> Self {
        self.max_lines = max_lines.into();
        self
    }

    /// Raw line cap where `-1` means unbounded.
    pub fn with_raw_max_lines(self, raw: i32) -> Result<Self, ConfigError> {
        let max_lines = MaxLines::from_raw(raw).ok_or(ConfigError::InvalidMaxLines(raw))?;
        Ok(self.with_max_lines(max_lines))
    }

    pub fn with_expand_action(mut self, action: impl Into<String>) -> Self {
        self.expand_action = action.into();
        self
    }

    pub fn with_action_color(mut self, color: Color) -> Self {
        self.action_color = color;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_soft_wrap(mut self, soft_wrap: bool) -> Self {
        self.soft_wrap = soft_wrap;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check(self.collapsed_max_lines, self.max_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ExpandableTextConfig::default();
        assert_eq!(config.collapsed_max_lines, 3);
        assert_eq!(config.max_lines, MaxLines::Unbounded);
        assert_eq!(config.action_color, Color::PURPLE);
        assert!(config.soft_wrap);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn collapsed_cap_above_max_lines_is_rejected() {
        let config = ExpandableTextConfig::new()
            .with_collapsed_max_lines(4)
            .with_max_lines(3);
        assert_eq!(
            config.validate(),
            Err(ConfigError::CollapsedExceedsMax {
                collapsed_max_lines: 4,
                max_lines: 3
            })
        );
    }

    #[test]
    fn equal_caps_are_accepted() {
        let config = ExpandableTextConfig::new()
            .with_collapsed_max_lines(3)
            .with_max_lines(3);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_collapsed_lines_is_rejected() {
        let config = ExpandableTextConfig::new().with_collapsed_max_lines(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCollapsedLines));
    }

    #[test]
    fn raw_max_lines_follow_minus_one_convention() {
        let config = ExpandableTextConfig::new().with_raw_max_lines(-1);
        assert_eq!(config.map(|c| c.max_lines), Ok(MaxLines::Unbounded));
        assert_eq!(
            ExpandableTextConfig::new().with_raw_max_lines(0),
            Err(ConfigError::InvalidMaxLines(0))
        );
    }
}
