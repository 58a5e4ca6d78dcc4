//! Foundation elements for readmore: styled strings and collapsed text resolution

pub mod text;

// Re-export commonly used items
pub use text::{
    action_fragment, collapse_layout, measure_action_width, measure_collapsed_layout,
    resolve_collapsed_text, AnnotatedString, AnnotatedStringBuilder, CollapseRequest,
    CollapsedText, SpanStyle, StyledRange, Truncation,
};

pub mod prelude {
    pub use crate::text::{
        resolve_collapsed_text, AnnotatedString, CollapseRequest, CollapsedText, SpanStyle,
        Truncation,
    };
    pub use readmore_ui_layout::{TextMeasurer, TextStyle};
}
