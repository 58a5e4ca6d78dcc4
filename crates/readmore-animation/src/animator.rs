use crate::{AnimationSpec, Easing};

/// Identifies one transition started by [`HeightAnimator::animate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionId(u64);

/// Where the animator stands after a call to [`HeightAnimator::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationStatus {
    /// No transition in flight.
    Idle,
    /// Started but not ticked yet; the first tick anchors the start time.
    Pending { from: f32, to: f32 },
    Running { from: f32, to: f32, value: f32 },
    /// Reported exactly once, on the tick that reaches the target.
    Finished { value: f32 },
}

#[derive(Clone, Copy, Debug)]
struct ActiveTransition {
    id: TransitionId,
    from: f32,
    to: f32,
    duration_nanos: u64,
    easing: Easing,
    started_at: Option<u64>,
}

/// Owns at most one height transition.
///
/// Starting a new transition supersedes the current one immediately; the
/// superseded transition never reports [`AnimationStatus::Finished`].
#[derive(Debug)]
pub struct HeightAnimator {
    spec: AnimationSpec,
    value: f32,
    active: Option<ActiveTransition>,
    next_id: u64,
}

impl HeightAnimator {
    pub fn new(initial: f32) -> Self {
        Self::with_spec(initial, AnimationSpec::default())
    }

    pub fn with_spec(initial: f32, spec: AnimationSpec) -> Self {
        Self {
            spec,
            value: initial,
            active: None,
            next_id: 0,
        }
    }

    pub fn spec(&self) -> &AnimationSpec {
        &self.spec
    }

    /// Applies to transitions started after this call.
    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_transition(&self) -> Option<TransitionId> {
        self.active.map(|active| active.id)
    }

    pub fn target(&self) -> Option<f32> {
        self.active.map(|active| active.to)
    }

    pub fn status(&self) -> AnimationStatus {
        match self.active {
            None => AnimationStatus::Idle,
            Some(ActiveTransition {
                from,
                to,
                started_at: None,
                ..
            }) => AnimationStatus::Pending { from, to },
            Some(ActiveTransition { from, to, .. }) => AnimationStatus::Running {
                from,
                to,
                value: self.value,
            },
        }
    }

    /// Starts a transition from `from` to `to`, cancelling any in-flight one.
    pub fn animate(&mut self, from: f32, to: f32) -> TransitionId {
        if let Some(previous) = self.active.take() {
            log::trace!(
                "height transition {:?} superseded at {:.1}px",
                previous.id,
                self.value
            );
        }
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        let duration = self.spec.duration_between(from, to);
        self.value = from;
        self.active = Some(ActiveTransition {
            id,
            from,
            to,
            duration_nanos: u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX),
            easing: self.spec.easing,
            started_at: None,
        });
        log::trace!(
            "height transition {id:?}: {from:.1}px -> {to:.1}px over {}ms",
            duration.as_millis()
        );
        id
    }

    /// Starts a transition from the current value.
    pub fn animate_to(&mut self, to: f32) -> TransitionId {
        self.animate(self.value, to)
    }

    /// Stops the in-flight transition where it is. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(cancelled) => {
                log::trace!(
                    "height transition {:?} cancelled at {:.1}px",
                    cancelled.id,
                    self.value
                );
                true
            }
            None => false,
        }
    }

    /// Cancels any transition and jumps to `value`.
    pub fn snap_to(&mut self, value: f32) {
        self.cancel();
        self.value = value;
    }

    /// Advances the in-flight transition to `frame_time_nanos`.
    ///
    /// Frame times earlier than the transition start are treated as the start.
    pub fn tick(&mut self, frame_time_nanos: u64) -> AnimationStatus {
        let Some(active) = self.active.as_mut() else {
            return AnimationStatus::Idle;
        };
        let started_at = *active.started_at.get_or_insert(frame_time_nanos);
        let transition = *active;

        let elapsed = frame_time_nanos.saturating_sub(started_at);
        let fraction = if transition.duration_nanos == 0 {
            1.0
        } else {
            (elapsed as f64 / transition.duration_nanos as f64).min(1.0) as f32
        };

        if fraction >= 1.0 {
            self.value = transition.to;
            self.active = None;
            return AnimationStatus::Finished {
                value: transition.to,
            };
        }

        let eased = transition.easing.transform(fraction);
        self.value = transition.from + (transition.to - transition.from) * eased;
        AnimationStatus::Running {
            from: transition.from,
            to: transition.to,
            value: self.value,
        }
    }
}

impl Default for HeightAnimator {
    fn default() -> Self {
        Self::new(0.0)
    }
}
