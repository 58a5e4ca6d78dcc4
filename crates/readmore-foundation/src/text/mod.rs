//! Text module for expandable text.
//!
//! # Core Types
//!
//! - [`AnnotatedString`] - Plain text plus color/weight spans over byte ranges
//! - [`CollapseRequest`] - Inputs of one collapsed-text resolution
//! - [`CollapsedText`] - The resolved collapsed representation
//!
//! # Example
//!
//! ```text
//! let request = CollapseRequest::new(&text, 320.0, &style)
//!     .with_collapsed_max_lines(3)
//!     .with_expand_action("Read more", Color::BLUE);
//! let collapsed = resolve_collapsed_text(&measurer, &request);
//! assert!(collapsed.as_str().ends_with("… Read more"));
//! ```

mod annotated_string;
mod collapse;

pub use annotated_string::{AnnotatedString, AnnotatedStringBuilder, SpanStyle, StyledRange};
pub use collapse::{
    action_fragment, collapse_layout, measure_action_width, measure_collapsed_layout,
    resolve_collapsed_text, CollapseRequest, CollapsedText, Truncation,
};
