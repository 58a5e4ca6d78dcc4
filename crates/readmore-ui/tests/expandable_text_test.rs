use readmore_animation::AnimationStatus;
use readmore_testing::assertions::{assert_control_height, assert_span_color};
use readmore_testing::{ExpandableTextRule, MonospaceMeasurer, DEFAULT_MAX_FRAMES};
use readmore_ui::{
    ConfigError, DisclosureState, ExpandableText, ExpandableTextConfig, MaxLines, Phase,
    Truncation,
};
use readmore_ui_graphics::Color;
use std::cell::RefCell;
use std::rc::Rc;

/// Four lines at 100px: "aaaa bbbb " / "cccc dddd " / "eeee ffff " / "gggg hhhh".
const LONG_TEXT: &str = "aaaa bbbb cccc dddd eeee ffff gggg hhhh";
const COLLAPSED: &str = "aaaa bbbb cccc\u{2026} More";

fn config() -> ExpandableTextConfig {
    ExpandableTextConfig::new()
        .with_collapsed_max_lines(2)
        .with_expand_action("More")
        .with_action_color(Color::BLUE)
}

fn rule_with(measurer: MonospaceMeasurer, text: &str) -> ExpandableTextRule {
    let control = ExpandableText::with_config(measurer, text, config()).expect("valid config");
    let mut rule = ExpandableTextRule::new(control);
    rule.layout(100.0);
    rule
}

fn rule() -> ExpandableTextRule {
    rule_with(MonospaceMeasurer::new(), LONG_TEXT)
}

#[test]
fn collapsed_control_shows_collapsed_text() {
    let rule = rule();
    let control = rule.control();
    let displayed = control.displayed();

    assert_eq!(displayed.text.as_str(), COLLAPSED);
    assert_eq!(displayed.max_lines, MaxLines::Limited(2));
    assert_eq!(displayed.height, None);
    assert_span_color(&displayed.text, "More", Color::BLUE, "action");
    assert_eq!(control.phase(), Phase::Settled(DisclosureState::Collapsed));
    assert_eq!(control.current_height(), Some(40.0));
    assert!(control.is_clickable());
}

#[test]
fn toggle_animates_to_expanded_height() {
    let mut rule = rule();
    assert_eq!(rule.control_mut().toggle(), DisclosureState::Expanded);

    let control = rule.control();
    assert_eq!(control.state(), DisclosureState::Expanded);
    assert_eq!(
        control.phase(),
        Phase::Animating {
            from: DisclosureState::Collapsed,
            to: DisclosureState::Expanded
        }
    );
    let displayed = control.displayed();
    assert_eq!(displayed.text.as_str(), LONG_TEXT);
    assert_eq!(displayed.height, Some(40.0));

    rule.pump_until_idle(DEFAULT_MAX_FRAMES).expect("animation settles");
    let heights = rule.running_heights();
    assert!(!heights.is_empty());
    assert!(heights.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(heights.iter().all(|height| (40.0..=80.0).contains(height)));
    assert_eq!(
        rule.statuses().last(),
        Some(&AnimationStatus::Finished { value: 80.0 })
    );

    let control = rule.control();
    assert_eq!(control.phase(), Phase::Settled(DisclosureState::Expanded));
    let displayed = control.displayed();
    assert_eq!(displayed.text.as_str(), LONG_TEXT);
    assert_eq!(displayed.max_lines, MaxLines::Unbounded);
    assert_eq!(displayed.height, None);
    assert_eq!(control.current_height(), Some(80.0));
}

#[test]
fn toggle_twice_restores_collapsed_rendering() {
    let mut rule = rule();
    let initial = rule.control().displayed();

    rule.control_mut().toggle();
    rule.pump_until_idle(DEFAULT_MAX_FRAMES).unwrap();
    rule.control_mut().toggle();
    rule.pump_until_idle(DEFAULT_MAX_FRAMES).unwrap();

    assert_eq!(rule.control().state(), DisclosureState::Collapsed);
    assert_eq!(rule.control().displayed(), initial);
    assert_eq!(rule.finished_count(), 2);
}

#[test]
fn toggle_mid_animation_starts_from_animated_height() {
    let mut rule = rule();
    rule.control_mut().toggle();
    for _ in 0..3 {
        rule.advance_frame();
    }
    let midway = rule.control().current_height().unwrap();
    assert!(midway > 40.0 && midway < 80.0, "midway height {midway}");

    rule.control_mut().toggle();
    let control = rule.control();
    assert_eq!(control.state(), DisclosureState::Collapsed);
    assert_eq!(control.displayed().height, Some(midway));
    assert_eq!(
        control.phase(),
        Phase::Animating {
            from: DisclosureState::Expanded,
            to: DisclosureState::Collapsed
        }
    );

    rule.pump_until_idle(DEFAULT_MAX_FRAMES).unwrap();
    // The superseded expansion never completes.
    assert_eq!(rule.finished_count(), 1);
    assert_eq!(
        rule.statuses().last(),
        Some(&AnimationStatus::Finished { value: 40.0 })
    );
    assert_eq!(rule.control().displayed().text.as_str(), COLLAPSED);
}

#[test]
fn ticks_after_completion_are_no_ops() {
    let mut rule = rule();
    rule.control_mut().toggle();
    rule.pump_until_idle(DEFAULT_MAX_FRAMES).unwrap();
    assert_eq!(rule.advance_frame(), AnimationStatus::Idle);
    assert_eq!(rule.control().phase(), Phase::Settled(DisclosureState::Expanded));
}

#[test]
fn reconfiguration_keeps_animation_target() {
    let mut rule = rule();
    rule.control_mut().toggle();
    rule.advance_frame();

    rule.control_mut()
        .set_text(format!("{LONG_TEXT} iiii jjjj"));
    assert!(rule.control().has_active_animation());

    rule.pump_until_idle(DEFAULT_MAX_FRAMES).unwrap();
    assert_eq!(
        rule.statuses().last(),
        Some(&AnimationStatus::Finished { value: 80.0 })
    );
    // Once settled the fresh layout takes over.
    assert_eq!(rule.control().current_height(), Some(100.0));

    rule.control_mut().toggle();
    rule.advance_frame();
    assert_eq!(rule.control().displayed().height, Some(100.0));
}

#[test]
fn unchanged_width_does_not_remeasure() {
    let mut rule = rule();
    let calls = rule.control().measurer().measure_calls();
    rule.layout(100.0);
    assert_eq!(rule.control().measurer().measure_calls(), calls);

    rule.layout(200.0);
    assert!(rule.control().measurer().measure_calls() > calls);
}

#[test]
fn degenerate_widths_keep_last_layout() {
    let mut rule = rule();
    for width in [0.0, -10.0, f32::NAN] {
        rule.layout(width);
        assert_eq!(rule.control().available_width(), Some(100.0));
        assert_eq!(rule.control().displayed().text.as_str(), COLLAPSED);
    }
}

#[test]
fn toggle_before_layout_flips_without_animation() {
    let control = ExpandableText::with_config(MonospaceMeasurer::new(), LONG_TEXT, config())
        .expect("valid config");
    let mut rule = ExpandableTextRule::new(control);
    rule.control_mut().toggle();
    assert_eq!(rule.control().phase(), Phase::Settled(DisclosureState::Expanded));
    assert_eq!(rule.control().current_height(), None);
}

#[test]
fn short_text_toggles_without_animation_and_ignores_clicks() {
    let mut rule = rule_with(MonospaceMeasurer::new(), "short");
    assert_eq!(
        rule.control().collapsed_text().map(|c| c.truncation()),
        Some(Truncation::None)
    );
    assert!(!rule.control().is_clickable());
    assert_eq!(rule.click_and_settle(), Ok(false));
    assert_eq!(rule.control().state(), DisclosureState::Collapsed);

    rule.control_mut().toggle();
    assert!(!rule.control().has_active_animation());
    assert_eq!(rule.control().state(), DisclosureState::Expanded);
    assert_eq!(rule.control().displayed().text.as_str(), "short");
}

#[test]
fn on_toggle_sees_every_toggle_but_not_bindings() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut rule = rule();
    let sink = Rc::clone(&seen);
    rule.control_mut()
        .set_on_toggle(move |state| sink.borrow_mut().push(state));

    assert_eq!(rule.click_and_settle(), Ok(true));
    rule.control_mut().toggle();
    rule.control_mut().set_expanded(true);

    assert_eq!(
        *seen.borrow(),
        vec![DisclosureState::Expanded, DisclosureState::Collapsed]
    );
    assert_eq!(rule.control().state(), DisclosureState::Expanded);
}

#[test]
fn binding_animates_only_on_change() {
    let mut rule = rule();
    rule.control_mut().set_expanded(false);
    assert!(!rule.control().has_active_animation());

    rule.control_mut().set_expanded(true);
    assert!(rule.control().has_active_animation());
    rule.pump_until_idle(DEFAULT_MAX_FRAMES).unwrap();
    assert_eq!(rule.control().state(), DisclosureState::Expanded);

    rule.control_mut().set_expanded(true);
    assert!(!rule.control().has_active_animation());
}

#[test]
fn reading_assistance_shows_full_text_and_disables_click() {
    let mut rule = rule();
    rule.control_mut().set_reading_assistance(true);

    let displayed = rule.control().displayed();
    assert_eq!(displayed.text.as_str(), LONG_TEXT);
    assert_eq!(displayed.max_lines, MaxLines::Unbounded);
    assert_eq!(displayed.height, None);
    assert!(!rule.control().is_clickable());
    assert_eq!(rule.click_and_settle(), Ok(false));
    assert_eq!(rule.control().state(), DisclosureState::Collapsed);

    rule.control_mut().set_reading_assistance(false);
    assert_eq!(rule.control().displayed().text.as_str(), COLLAPSED);
}

#[test]
fn reading_assistance_cancels_running_transition() {
    let mut rule = rule();
    rule.control_mut().toggle();
    rule.advance_frame();
    rule.control_mut().set_reading_assistance(true);
    assert!(!rule.control().has_active_animation());
    assert_eq!(rule.control().current_height(), Some(80.0));
}

#[test]
fn invalid_line_caps_are_rejected_without_side_effects() {
    let mut rule = rule();
    assert_eq!(rule.control_mut().set_max_lines(MaxLines::Limited(2)), Ok(()));
    assert_eq!(
        rule.control_mut().set_collapsed_max_lines(3),
        Err(ConfigError::CollapsedExceedsMax {
            collapsed_max_lines: 3,
            max_lines: 2
        })
    );
    assert_eq!(rule.control().config().collapsed_max_lines, 2);
    assert_eq!(
        rule.control_mut().set_max_lines(MaxLines::Limited(1)),
        Err(ConfigError::CollapsedExceedsMax {
            collapsed_max_lines: 2,
            max_lines: 1
        })
    );
    assert_eq!(rule.control().config().max_lines, MaxLines::Limited(2));
    assert_eq!(
        rule.control_mut().set_collapsed_max_lines(0),
        Err(ConfigError::ZeroCollapsedLines)
    );
}

#[test]
fn max_lines_caps_expanded_height() {
    let mut rule = rule();
    rule.control_mut()
        .set_max_lines(MaxLines::Limited(3))
        .expect("3 >= 2");
    rule.control_mut().toggle();
    rule.pump_until_idle(DEFAULT_MAX_FRAMES).unwrap();

    let control = rule.control();
    assert_eq!(control.displayed().max_lines, MaxLines::Limited(3));
    assert_eq!(control.current_height(), Some(60.0));
    assert_eq!(control.displayed_size().map(|size| size.height), Some(60.0));
}

#[test]
fn raising_collapsed_cap_can_remove_truncation() {
    let mut rule = rule();
    rule.control_mut().set_collapsed_max_lines(4).unwrap();
    assert!(!rule.control().is_truncated());
    assert_eq!(rule.control().displayed().text.as_str(), LONG_TEXT);
}

#[test]
fn action_changes_recompute_collapsed_text() {
    let mut rule = rule();
    rule.control_mut().set_expand_action("Read more");
    let collapsed = rule.control().collapsed_text().unwrap().clone();
    assert_eq!(collapsed.as_str(), "aaaa bbbb\u{2026} Read more");

    rule.control_mut().set_action_color(Color::GRAY);
    assert_span_color(
        rule.control().collapsed_text().unwrap().text(),
        "Read more",
        Color::GRAY,
        "recolored action",
    );
}

#[test]
fn dispose_commits_state_without_animation() {
    let mut rule = rule();
    rule.control_mut().toggle();
    rule.advance_frame();
    rule.control_mut().dispose();

    assert!(!rule.control().has_active_animation());
    assert_eq!(rule.control().phase(), Phase::Settled(DisclosureState::Expanded));
    assert_eq!(rule.control().displayed().height, None);
    assert_eq!(rule.advance_frame(), AnimationStatus::Idle);
}

#[test]
fn expanded_by_default() {
    let control = ExpandableText::with_config(MonospaceMeasurer::new(), LONG_TEXT, config())
        .expect("valid config")
        .with_state(DisclosureState::Expanded);
    let mut rule = ExpandableTextRule::new(control);
    rule.layout(100.0);

    assert_eq!(rule.control().displayed().text.as_str(), LONG_TEXT);
    assert_eq!(rule.control().current_height(), Some(80.0));
    rule.control_mut().toggle();
    rule.pump_until_idle(DEFAULT_MAX_FRAMES).unwrap();
    assert_eq!(rule.control().displayed().text.as_str(), COLLAPSED);
}

#[test]
fn missing_ellipsis_still_toggles() {
    let mut rule = rule_with(MonospaceMeasurer::new().with_ellipsis_glyph(false), LONG_TEXT);
    let collapsed = rule.control().collapsed_text().unwrap();
    assert_eq!(collapsed.truncation(), Truncation::CappedWithoutAction);
    assert_eq!(collapsed.as_str(), "aaaa bbbb cccc dddd");

    assert_eq!(rule.click_and_settle(), Ok(true));
    assert_eq!(rule.control().displayed().text.as_str(), LONG_TEXT);
}

#[test]
fn custom_animation_spec_changes_frame_count() {
    use readmore_animation::{AnimationSpec, Easing};
    use std::time::Duration;

    let mut rule = rule();
    rule.control_mut()
        .set_animation_spec(AnimationSpec::tween(Duration::ZERO, Easing::Linear));
    rule.control_mut().toggle();
    assert_eq!(rule.pump_until_idle(DEFAULT_MAX_FRAMES), Ok(1));

    let mut rule = rule_with(MonospaceMeasurer::new(), LONG_TEXT);
    rule.control_mut().toggle();
    let frames = rule.pump_until_idle(DEFAULT_MAX_FRAMES).unwrap();
    // 40px at 2ms/px is 80ms: the anchor frame plus five more.
    assert_eq!(frames, 6);
    assert_control_height(rule.control(), 80.0, "settled height");
}
