//! Frame-driven animation for readmore.
//!
//! Animations here never own a timer. The host's frame clock calls
//! [`HeightAnimator::tick`] with a monotonically increasing frame time and gets
//! back an [`AnimationStatus`] describing where the transition is.

mod animator;
mod easing;
mod frame_clock;
mod spec;

pub use animator::{AnimationStatus, HeightAnimator, TransitionId};
pub use easing::{CubicBezierEasing, Easing};
pub use frame_clock::{FrameClock, FRAME_INTERVAL};
pub use spec::{AnimationSpec, DurationPolicy};
