// Use web-time for cross-platform time support (native + WASM)
use std::time::Duration;
use web_time::Instant;

/// Nominal 60 Hz frame interval.
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Converts wall-clock time into the frame timestamps fed to
/// [`crate::HeightAnimator::tick`].
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    start_time: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Nanoseconds elapsed since the clock was created.
    pub fn frame_time_nanos(&self) -> u64 {
        Instant::now()
            .checked_duration_since(self.start_time)
            .unwrap_or_default()
            .as_nanos() as u64
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
