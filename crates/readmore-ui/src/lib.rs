//! Expandable text control for readmore
//!
//! [`ExpandableText`] owns the disclosure state, the derived collapsed layout
//! and the height animation of one block of text. Hosts feed it widths,
//! clicks and frame times; [`HeadlessRenderer`] turns its displayed state into
//! recorded draw operations.

mod config;
mod debug;
mod error;
mod expandable_text;
pub mod renderer;

pub use config::ExpandableTextConfig;
pub use debug::{format_render_scene, log_render_scene};
pub use error::ConfigError;
pub use expandable_text::{DisclosureState, DisplayedText, ExpandableText, Phase};
pub use renderer::{HeadlessRenderer, RecordedRenderScene, RenderOp};

// Re-export the types that appear in this crate's public API
pub use readmore_animation::{AnimationSpec, AnimationStatus, DurationPolicy, Easing};
pub use readmore_foundation::text::{AnnotatedString, CollapsedText, SpanStyle, Truncation};
pub use readmore_ui_layout::{MaxLines, TextMeasurer, TextStyle};

pub mod prelude {
    pub use crate::{
        DisclosureState, ExpandableText, ExpandableTextConfig, HeadlessRenderer, Phase,
    };
    pub use readmore_ui_graphics::{Color, Point};
    pub use readmore_ui_layout::{MaxLines, TextMeasurer, TextStyle};
}
