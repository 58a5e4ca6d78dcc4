#![deny(missing_docs)]

//! Expandable text for Rust UI toolkits.
//!
//! Applications depend on this crate alone. It re-exports the control, the
//! collapse resolver and the measurement contracts; the `cosmic` feature adds
//! a cosmic-text backed measurer and `testing` adds the deterministic harness.

/// Re-export the UI crate so applications can depend on a single crate.
pub use readmore_ui::*;

/// Collapsed text resolution, usable without the stateful control.
pub use readmore_foundation::text;

/// Geometry and color primitives.
pub use readmore_ui_graphics::{Color, Point, Rect, Size};

/// Layout contracts a toolkit implements to plug in its shaping engine.
pub use readmore_ui_layout::{
    CaretStop, FontFamily, FontStyle, FontWeight, LineMetrics, ResolvedTextDirection,
    TextLayoutInput, TextLayoutResult, ELLIPSIS,
};

/// Frame-driven animation primitives.
pub use readmore_animation::{CubicBezierEasing, FrameClock, HeightAnimator, FRAME_INTERVAL};

/// cosmic-text backed measurer.
#[cfg(feature = "cosmic")]
pub use readmore_render_cosmic::CosmicTextMeasurer;

/// Deterministic measurer and frame harness for tests.
#[cfg(feature = "testing")]
pub use readmore_testing as testing;

/// Convenience imports for readmore applications.
pub mod prelude {
    pub use crate::{
        AnimationSpec, Color, DisclosureState, Easing, ExpandableText, ExpandableTextConfig,
        FrameClock, HeadlessRenderer, MaxLines, Phase, Point, TextMeasurer, TextStyle,
        Truncation,
    };
    #[cfg(feature = "cosmic")]
    pub use crate::CosmicTextMeasurer;
}

/// Builds a control with the most common configuration: a colored action
/// label shown after `collapsed_max_lines` lines.
pub fn read_more<M: TextMeasurer>(
    measurer: M,
    text: impl Into<String>,
    collapsed_max_lines: usize,
    expand_action: impl Into<String>,
) -> Result<ExpandableText<M>, ConfigError> {
    let config = ExpandableTextConfig::new()
        .with_collapsed_max_lines(collapsed_max_lines)
        .with_expand_action(expand_action);
    log::debug!("building read-more control with {collapsed_max_lines} collapsed lines");
    ExpandableText::with_config(measurer, text, config)
}
