use readmore_ui_layout::MaxLines;

/// Rejected configuration. The previous configuration stays in effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("collapsed_max_lines must be at least 1")]
    ZeroCollapsedLines,
    #[error("collapsed_max_lines ({collapsed_max_lines}) must not exceed max_lines ({max_lines})")]
    CollapsedExceedsMax {
        collapsed_max_lines: usize,
        max_lines: usize,
    },
    #[error("max_lines must be -1 (unbounded) or at least 1, got {0}")]
    InvalidMaxLines(i32),
}

impl ConfigError {
    pub(crate) fn check(collapsed_max_lines: usize, max_lines: MaxLines) -> Result<(), Self> {
        if collapsed_max_lines == 0 {
            return Err(ConfigError::ZeroCollapsedLines);
        }
        match max_lines {
            MaxLines::Limited(0) => Err(ConfigError::InvalidMaxLines(0)),
            MaxLines::Limited(max_lines) if collapsed_max_lines > max_lines => {
                Err(ConfigError::CollapsedExceedsMax {
                    collapsed_max_lines,
                    max_lines,
                })
            }
            _ => Ok(()),
        }
    }
}
