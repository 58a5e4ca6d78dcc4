//! Assertion utilities for expandable text tests
//!
//! Helpers speak in terms of rendered scenes, layouts and styled spans so a
//! failing test prints the lines that were actually drawn.

use readmore_foundation::text::AnnotatedString;
use readmore_ui::{ExpandableText, RecordedRenderScene, RenderOp};
use readmore_ui_graphics::{Color, Rect};
use readmore_ui_layout::{TextLayoutResult, TextMeasurer};

/// Geometry tolerance shared by the helpers below.
pub const GEOMETRY_EPSILON: f32 = 0.01;

fn close(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() <= GEOMETRY_EPSILON
}

/// Assert the height the control occupies this frame.
pub fn assert_control_height<M: TextMeasurer>(
    control: &ExpandableText<M>,
    expected: f32,
    msg: &str,
) {
    let actual = control.current_height();
    assert!(
        actual.is_some_and(|height| close(height, expected)),
        "{msg}: expected height {expected}, got {actual:?} ({:?})",
        control.phase()
    );
}

/// Assert the exact text of every drawn line, top to bottom.
pub fn assert_scene_lines(scene: &RecordedRenderScene, expected: &[&str], msg: &str) {
    let lines = scene.lines();
    assert_eq!(lines, expected, "{msg}: drawn lines differ");
}

/// Assert how many lines were drawn.
pub fn assert_scene_line_count(scene: &RecordedRenderScene, expected: usize, msg: &str) {
    let lines = scene.lines();
    assert!(
        lines.len() == expected,
        "{msg}: expected {expected} drawn lines, got {}: {lines:?}",
        lines.len()
    );
}

/// Assert whether any drawn line contains `fragment`.
pub fn assert_scene_shows(scene: &RecordedRenderScene, fragment: &str, shown: bool, msg: &str) {
    let lines = scene.lines();
    let found = lines.iter().any(|line| line.contains(fragment));
    assert!(
        found == shown,
        "{msg}: '{fragment}' {} in {lines:?}",
        if shown { "not drawn" } else { "unexpectedly drawn" }
    );
}

/// Assert the bounds of the single run drawn in `color`.
pub fn assert_run_bounds(scene: &RecordedRenderScene, color: Color, expected: Rect, msg: &str) {
    let rects: Vec<Rect> = scene
        .operations()
        .iter()
        .filter_map(|op| match op {
            RenderOp::Text { rect, color: c, .. } if *c == color => Some(*rect),
            _ => None,
        })
        .collect();
    let [rect] = rects.as_slice() else {
        panic!("{msg}: expected one run in {color:?}, found {rects:?}");
    };
    let matches = close(rect.x, expected.x)
        && close(rect.y, expected.y)
        && close(rect.width, expected.width)
        && close(rect.height, expected.height);
    assert!(matches, "{msg}: run at {rect:?}, expected {expected:?}");
}

/// Assert that every line of a layout ends within `width`.
pub fn assert_lines_fit(layout: &TextLayoutResult, width: f32, msg: &str) {
    for (index, line) in layout.lines().iter().enumerate() {
        assert!(
            line.left >= -GEOMETRY_EPSILON && line.right() <= width + GEOMETRY_EPSILON,
            "{}: line {} spans {:.2}..{:.2}, outside 0..{}",
            msg,
            index,
            line.left,
            line.right(),
            width
        );
    }
}

/// Assert that `fragment` is covered by exactly one span of `color`.
pub fn assert_span_color(text: &AnnotatedString, fragment: &str, color: Color, msg: &str) {
    let spans: Vec<_> = text
        .styled_segments()
        .filter(|(segment, style)| *segment == fragment && style.color == Some(color))
        .collect();
    assert_eq!(
        spans.len(),
        1,
        "{}: expected one {:?} span over '{}' in {:?}",
        msg,
        color,
        fragment,
        text
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonospaceMeasurer;
    use readmore_foundation::text::SpanStyle;
    use readmore_ui_graphics::Point;

    fn scene() -> RecordedRenderScene {
        RecordedRenderScene::new(vec![
            RenderOp::Text {
                line: 0,
                rect: Rect::new(0.0, 0.0, 60.0, 20.0),
                value: "Lorem\u{2026} ".to_string(),
                color: Color::BLACK,
            },
            RenderOp::Text {
                line: 0,
                rect: Rect::new(60.0, 0.0, 40.0, 20.0),
                value: "More".to_string(),
                color: Color::BLUE,
            },
        ])
    }

    #[test]
    fn scene_helpers_read_drawn_lines() {
        let scene = scene();
        assert_scene_lines(&scene, &["Lorem\u{2026} More"], "one line");
        assert_scene_line_count(&scene, 1, "one line");
        assert_scene_shows(&scene, "\u{2026} More", true, "action drawn");
        assert_scene_shows(&scene, "dolor", false, "cut text hidden");
        assert_run_bounds(&scene, Color::BLUE, Rect::new(60.0, 0.0, 40.0, 20.0), "action");
    }

    #[test]
    #[should_panic]
    fn run_bounds_fail_on_missing_color() {
        assert_run_bounds(&scene(), Color::PURPLE, Rect::default(), "no purple run");
    }

    #[test]
    fn control_height_reads_layout() {
        let mut control = ExpandableText::new(MonospaceMeasurer::new(), "short");
        control.on_layout(100.0);
        assert_control_height(&control, 20.0, "one line");
        let scene = readmore_ui::HeadlessRenderer::new().render(&control, Point::default());
        assert_scene_lines(&scene, &["short"], "unchanged");
    }

    #[test]
    #[should_panic]
    fn control_height_fails_before_layout() {
        let control = ExpandableText::new(MonospaceMeasurer::new(), "short");
        assert_control_height(&control, 20.0, "not laid out");
    }

    #[test]
    fn test_span_color() {
        let mut builder = AnnotatedString::builder();
        builder
            .append("Lorem\u{2026} ")
            .with_style(SpanStyle::color(Color::BLUE), |b| {
                b.append("More");
            });
        assert_span_color(&builder.build(), "More", Color::BLUE, "action span");
    }

    #[test]
    #[should_panic]
    fn test_span_color_fails_on_plain_text() {
        assert_span_color(&AnnotatedString::new("More"), "More", Color::BLUE, "no span");
    }
}
