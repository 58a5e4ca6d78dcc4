//! The expand/collapse state machine.

use crate::{ConfigError, ExpandableTextConfig};
use readmore_animation::{AnimationSpec, AnimationStatus, HeightAnimator, TransitionId};
use readmore_foundation::text::{
    resolve_collapsed_text, AnnotatedString, CollapseRequest, CollapsedText,
};
use readmore_ui_graphics::{Color, Size};
use readmore_ui_layout::{MaxLines, TextLayoutInput, TextLayoutResult, TextMeasurer, TextStyle};
use std::fmt;

/// Logical disclosure state. Only an explicit toggle or binding change moves it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DisclosureState {
    #[default]
    Collapsed,
    Expanded,
}

impl DisclosureState {
    pub fn from_expanded(expanded: bool) -> Self {
        if expanded {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// Logical state plus whether a height transition is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Settled(DisclosureState),
    Animating {
        from: DisclosureState,
        to: DisclosureState,
    },
}

/// What the host should draw this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayedText {
    pub text: AnnotatedString,
    pub max_lines: MaxLines,
    /// Height clamp while animating; `None` lets the text take its natural height.
    pub height: Option<f32>,
}

/// Derived values for one (text, width, configuration) snapshot.
#[derive(Clone, Debug)]
struct ResolvedLayout {
    width: f32,
    collapsed: CollapsedText,
    collapsed_height: f32,
    expanded_height: f32,
}

impl ResolvedLayout {
    fn height_for(&self, state: DisclosureState) -> f32 {
        match state {
            DisclosureState::Collapsed => self.collapsed_height,
            DisclosureState::Expanded => self.expanded_height,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    id: TransitionId,
    from: DisclosureState,
}

type ToggleCallback = Box<dyn FnMut(DisclosureState)>;

/// A block of text that collapses to a few lines ending in `"… <action>"` and
/// animates to its full height when toggled.
///
/// The host drives it with three inputs: [`Self::on_layout`] with the width
/// available to the text, [`Self::toggle`]/[`Self::click`]/[`Self::set_expanded`]
/// for interaction, and [`Self::tick`] from its frame clock. It reads back
/// [`Self::displayed`] to draw.
///
/// Every configuration change recomputes the derived layouts as a whole. An
/// in-flight height transition keeps running to its original target; the next
/// toggle picks up the fresh heights.
pub struct ExpandableText<M: TextMeasurer> {
    measurer: M,
    text: String,
    config: ExpandableTextConfig,
    state: DisclosureState,
    available_width: Option<f32>,
    layout: Option<ResolvedLayout>,
    animator: HeightAnimator,
    transition: Option<Transition>,
    reading_assistance: bool,
    on_toggle: Option<ToggleCallback>,
}

impl<M: TextMeasurer> ExpandableText<M> {
    /// Collapsed control with the default configuration.
    pub fn new(measurer: M, text: impl Into<String>) -> Self {
        Self {
            measurer,
            text: text.into(),
            config: ExpandableTextConfig::default(),
            state: DisclosureState::Collapsed,
            available_width: None,
            layout: None,
            animator: HeightAnimator::default(),
            transition: None,
            reading_assistance: false,
            on_toggle: None,
        }
    }

    pub fn with_config(
        measurer: M,
        text: impl Into<String>,
        config: ExpandableTextConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut control = Self::new(measurer, text);
        control.config = config;
        Ok(control)
    }

    /// Sets the initial disclosure state, e.g. expanded by default.
    pub fn with_state(mut self, state: DisclosureState) -> Self {
        self.state = state;
        self
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &ExpandableTextConfig {
        &self.config
    }

    pub fn state(&self) -> DisclosureState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    pub fn phase(&self) -> Phase {
        match self.transition {
            Some(transition) => Phase::Animating {
                from: transition.from,
                to: self.state,
            },
            None => Phase::Settled(self.state),
        }
    }

    pub fn available_width(&self) -> Option<f32> {
        self.available_width
    }

    /// Collapsed representation for the current width, once laid out.
    pub fn collapsed_text(&self) -> Option<&CollapsedText> {
        self.layout.as_ref().map(|layout| &layout.collapsed)
    }

    pub fn is_truncated(&self) -> bool {
        self.collapsed_text()
            .is_some_and(|collapsed| collapsed.is_truncated())
    }

    pub fn is_clickable(&self) -> bool {
        self.is_truncated() && !self.reading_assistance
    }

    pub fn is_reading_assistance_active(&self) -> bool {
        self.reading_assistance
    }

    // Layout

    /// Layout pass input. Unusable widths (zero, negative, NaN) are ignored and
    /// the last good layout is kept.
    pub fn on_layout(&mut self, available_width: f32) {
        if !(available_width > 0.0) {
            log::debug!("layout skipped: unusable width {available_width}");
            return;
        }
        if self.available_width == Some(available_width) && self.layout.is_some() {
            return;
        }
        self.available_width = Some(available_width);
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.layout = self.available_width.map(|width| self.resolve(width));
    }

    fn resolve(&self, width: f32) -> ResolvedLayout {
        let config = &self.config;
        let request = CollapseRequest::new(&self.text, width, &config.style)
            .with_collapsed_max_lines(config.collapsed_max_lines)
            .with_expand_action(&config.expand_action, config.action_color)
            .with_soft_wrap(config.soft_wrap);
        let collapsed = resolve_collapsed_text(&self.measurer, &request);
        let collapsed_height = self
            .measure(
                collapsed.as_str(),
                width,
                MaxLines::Limited(config.collapsed_max_lines),
            )
            .size()
            .height;
        let expanded_height = self
            .measure(&self.text, width, config.max_lines)
            .size()
            .height;
        log::debug!(
            "resolved layout at {width:.1}px: {:?}, heights {collapsed_height:.1}/{expanded_height:.1}",
            collapsed.truncation()
        );
        ResolvedLayout {
            width,
            collapsed,
            collapsed_height,
            expanded_height,
        }
    }

    fn measure(&self, text: &str, width: f32, max_lines: MaxLines) -> TextLayoutResult {
        self.measurer.measure(
            &TextLayoutInput::new(text, &self.config.style, width)
                .with_max_lines(max_lines)
                .with_soft_wrap(self.config.soft_wrap),
        )
    }

    // Configuration

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.invalidate();
        }
    }

    pub fn set_expand_action(&mut self, action: impl Into<String>) {
        let config = self.config.clone().with_expand_action(action);
        self.replace_config(config);
    }

    pub fn set_action_color(&mut self, color: Color) {
        let config = self.config.clone().with_action_color(color);
        self.replace_config(config);
    }

    pub fn set_style(&mut self, style: TextStyle) {
        let config = self.config.clone().with_style(style);
        self.replace_config(config);
    }

    pub fn set_soft_wrap(&mut self, soft_wrap: bool) {
        let config = self.config.clone().with_soft_wrap(soft_wrap);
        self.replace_config(config);
    }

    pub fn set_collapsed_max_lines(&mut self, lines: usize) -> Result<(), ConfigError> {
        self.set_config(self.config.clone().with_collapsed_max_lines(lines))
    }

    pub fn set_max_lines(&mut self, max_lines: MaxLines) -> Result<(), ConfigError> {
        self.set_config(self.config.clone().with_max_lines(max_lines))
    }

    /// Replaces the whole configuration snapshot. On error nothing changes.
    pub fn set_config(&mut self, config: ExpandableTextConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.replace_config(config);
        Ok(())
    }

    fn replace_config(&mut self, config: ExpandableTextConfig) {
        if config != self.config {
            self.config = config;
            self.invalidate();
        }
    }

    /// Curve and duration strategy for transitions started after this call.
    pub fn set_animation_spec(&mut self, spec: AnimationSpec) {
        self.animator.set_spec(spec);
    }

    /// Called with the new state on every [`Self::toggle`], including clicks.
    pub fn set_on_toggle(&mut self, callback: impl FnMut(DisclosureState) + 'static) {
        self.on_toggle = Some(Box::new(callback));
    }

    /// While active the control renders expanded and ignores clicks. The
    /// logical state is kept and shown again once the signal clears.
    pub fn set_reading_assistance(&mut self, active: bool) {
        if active == self.reading_assistance {
            return;
        }
        if active {
            self.cancel_transition();
        }
        self.reading_assistance = active;
    }

    // Disclosure

    /// Flips the disclosure state, animating the height when the text is
    /// truncated and laid out. Returns the new state.
    pub fn toggle(&mut self) -> DisclosureState {
        let target = self.state.toggled();
        self.transition_to(target);
        if let Some(callback) = self.on_toggle.as_mut() {
            callback(target);
        }
        target
    }

    /// Pointer activation. Returns whether the click toggled the control.
    pub fn click(&mut self) -> bool {
        if !self.is_clickable() {
            return false;
        }
        self.toggle();
        true
    }

    /// External binding. Animates like [`Self::toggle`] when `expanded`
    /// differs from the current state; the toggle callback is not invoked.
    pub fn set_expanded(&mut self, expanded: bool) {
        let target = DisclosureState::from_expanded(expanded);
        if target != self.state {
            self.transition_to(target);
        }
    }

    fn transition_to(&mut self, target: DisclosureState) {
        let from = self.state;
        let heights = match &self.layout {
            Some(layout) if layout.collapsed.is_truncated() && !self.reading_assistance => {
                Some((layout.height_for(from), layout.height_for(target)))
            }
            _ => None,
        };
        let Some((settled_height, target_height)) = heights else {
            self.cancel_transition();
            self.state = target;
            log::debug!("{from:?} -> {target:?} without animation");
            return;
        };

        let start_height = if self.animator.is_running() {
            self.animator.value()
        } else {
            settled_height
        };
        let id = self.animator.animate(start_height, target_height);
        self.transition = Some(Transition { id, from });
        self.state = target;
    }

    fn cancel_transition(&mut self) {
        if let Some(transition) = self.transition.take() {
            self.animator.cancel();
            log::trace!("transition {:?} cancelled", transition.id);
        }
    }

    /// Detaches the control: any in-flight transition is dropped and the
    /// logical state is committed without animation.
    pub fn dispose(&mut self) {
        if self.transition.is_some() {
            log::debug!("disposed while animating; committing {:?}", self.state);
        }
        self.cancel_transition();
    }

    // Frames

    /// Advances the height transition to `frame_time_nanos`.
    pub fn tick(&mut self, frame_time_nanos: u64) -> AnimationStatus {
        let status = self.animator.tick(frame_time_nanos);
        if let AnimationStatus::Finished { value } = status {
            if let Some(transition) = self.transition.take() {
                log::debug!(
                    "transition {:?} finished at {value:.1}px, committed {:?}",
                    transition.id,
                    self.state
                );
            }
        }
        status
    }

    pub fn has_active_animation(&self) -> bool {
        self.transition.is_some()
    }

    /// The representation to draw right now.
    pub fn displayed(&self) -> DisplayedText {
        let full_text = || DisplayedText {
            text: AnnotatedString::new(self.text.as_str()),
            max_lines: self.config.max_lines,
            height: None,
        };
        if self.reading_assistance {
            return full_text();
        }
        if self.transition.is_some() {
            return DisplayedText {
                height: Some(self.animator.value()),
                ..full_text()
            };
        }
        match self.state {
            DisclosureState::Expanded => full_text(),
            DisclosureState::Collapsed => DisplayedText {
                text: self.layout.as_ref().map_or_else(
                    || AnnotatedString::new(self.text.as_str()),
                    |layout| layout.collapsed.text().clone(),
                ),
                max_lines: MaxLines::Limited(self.config.collapsed_max_lines),
                height: None,
            },
        }
    }

    /// Height the control occupies this frame, once laid out.
    pub fn current_height(&self) -> Option<f32> {
        if self.transition.is_some() {
            return Some(self.animator.value());
        }
        self.layout.as_ref().map(|layout| {
            if self.reading_assistance {
                layout.expanded_height
            } else {
                layout.height_for(self.state)
            }
        })
    }

    pub fn displayed_size(&self) -> Option<Size> {
        let layout = self.layout.as_ref()?;
        Some(Size::new(layout.width, self.current_height()?))
    }

    /// Measures the displayed representation at the current width.
    pub fn displayed_layout(&self) -> Option<TextLayoutResult> {
        let width = self.layout.as_ref()?.width;
        let displayed = self.displayed();
        Some(self.measure(displayed.text.as_str(), width, displayed.max_lines))
    }
}

impl<M: TextMeasurer> fmt::Debug for ExpandableText<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandableText")
            .field("text_len", &self.text.len())
            .field("config", &self.config)
            .field("phase", &self.phase())
            .field("available_width", &self.available_width)
            .field("reading_assistance", &self.reading_assistance)
            .finish_non_exhaustive()
    }
}
