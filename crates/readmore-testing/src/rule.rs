use crate::MonospaceMeasurer;
use readmore_animation::{AnimationStatus, FRAME_INTERVAL};
use readmore_ui::{ExpandableText, HeadlessRenderer, RecordedRenderScene};
use readmore_ui_graphics::Point;
use readmore_ui_layout::TextMeasurer;

/// Frames [`ExpandableTextRule::pump_until_idle`] runs before giving up by default.
pub const DEFAULT_MAX_FRAMES: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("animation still running after {frames} frames")]
    NotIdle { frames: usize },
}

/// Drives one [`ExpandableText`] with a virtual frame clock.
///
/// Frames are spaced by [`FRAME_INTERVAL`]; every status the control reports
/// is recorded so tests can inspect the whole transition afterwards.
pub struct ExpandableTextRule<M: TextMeasurer = MonospaceMeasurer> {
    control: ExpandableText<M>,
    frame_time_nanos: u64,
    statuses: Vec<AnimationStatus>,
}

impl ExpandableTextRule<MonospaceMeasurer> {
    /// A control over [`MonospaceMeasurer`] laid out at `width`.
    pub fn monospace(text: &str, width: f32) -> Self {
        let mut rule = Self::new(ExpandableText::new(MonospaceMeasurer::new(), text));
        rule.layout(width);
        rule
    }
}

impl<M: TextMeasurer> ExpandableTextRule<M> {
    pub fn new(control: ExpandableText<M>) -> Self {
        Self {
            control,
            frame_time_nanos: 0,
            statuses: Vec::new(),
        }
    }

    pub fn control(&self) -> &ExpandableText<M> {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut ExpandableText<M> {
        &mut self.control
    }

    pub fn into_control(self) -> ExpandableText<M> {
        self.control
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Statuses reported by every frame pumped so far.
    pub fn statuses(&self) -> &[AnimationStatus] {
        &self.statuses
    }

    /// Animated heights of the recorded running frames.
    pub fn running_heights(&self) -> Vec<f32> {
        self.statuses
            .iter()
            .filter_map(|status| match status {
                AnimationStatus::Running { value, .. } => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Number of completions reported so far.
    pub fn finished_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|status| matches!(status, AnimationStatus::Finished { .. }))
            .count()
    }

    pub fn layout(&mut self, width: f32) -> &mut Self {
        self.control.on_layout(width);
        self
    }

    /// Advances the virtual clock by one frame and ticks the control.
    pub fn advance_frame(&mut self) -> AnimationStatus {
        self.frame_time_nanos += FRAME_INTERVAL.as_nanos() as u64;
        let status = self.control.tick(self.frame_time_nanos);
        log::trace!("frame at {}ns: {status:?}", self.frame_time_nanos);
        self.statuses.push(status);
        status
    }

    /// Pumps frames until no transition is in flight. Returns the number of
    /// frames pumped.
    pub fn pump_until_idle(&mut self, max_frames: usize) -> Result<usize, RuleError> {
        let mut frames = 0;
        while self.control.has_active_animation() {
            if frames == max_frames {
                return Err(RuleError::NotIdle { frames });
            }
            self.advance_frame();
            frames += 1;
        }
        Ok(frames)
    }

    /// Clicks the control and settles the resulting transition.
    pub fn click_and_settle(&mut self) -> Result<bool, RuleError> {
        let clicked = self.control.click();
        self.pump_until_idle(DEFAULT_MAX_FRAMES)?;
        Ok(clicked)
    }

    /// Renders the current frame with the control at the origin.
    pub fn render(&self) -> RecordedRenderScene {
        HeadlessRenderer::new().render(&self.control, Point::default())
    }
}
