//! Text layout contracts for readmore.
//!
//! The crates above this one never shape text themselves. They describe what
//! they need with a [`TextLayoutInput`] and hand it to a [`TextMeasurer`], the
//! seam behind which each toolkit plugs in its own shaping engine. The
//! measurer answers with an immutable [`TextLayoutResult`] exposing line
//! ranges, line widths, caret geometry and paragraph direction.

mod line_limits;
mod measurer;
mod text_layout;
mod text_style;

pub use line_limits::MaxLines;
pub use measurer::{TextMeasurer, ELLIPSIS};
pub use text_layout::{
    CaretStop, LineMetrics, ResolvedTextDirection, TextLayoutInput, TextLayoutResult,
};
pub use text_style::{FontFamily, FontStyle, FontWeight, TextDecoration, TextStyle};
