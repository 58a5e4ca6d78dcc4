use crate::ExpandableText;
use readmore_foundation::text::AnnotatedString;
use readmore_ui_graphics::{Color, Point, Rect};
use readmore_ui_layout::{LineMetrics, ResolvedTextDirection, TextLayoutResult, TextMeasurer};
use smallvec::{smallvec, SmallVec};
use std::ops::Range;

/// A rendered operation emitted by the headless renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOp {
    /// Height clamp applied while a transition is running.
    Clip { rect: Rect },
    /// One run of equally colored text on a line.
    Text {
        line: usize,
        rect: Rect,
        value: String,
        color: Color,
    },
}

/// A collection of render operations for one frame of a control.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedRenderScene {
    operations: Vec<RenderOp>,
}

impl RecordedRenderScene {
    pub fn new(operations: Vec<RenderOp>) -> Self {
        Self { operations }
    }

    /// Returns a slice of recorded render operations in submission order.
    pub fn operations(&self) -> &[RenderOp] {
        &self.operations
    }

    /// Consumes the scene and yields the owned operations.
    pub fn into_operations(self) -> Vec<RenderOp> {
        self.operations
    }

    pub fn clip(&self) -> Option<Rect> {
        self.operations.iter().find_map(|op| match op {
            RenderOp::Clip { rect } => Some(*rect),
            _ => None,
        })
    }

    /// Text of each drawn line, runs concatenated.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        for op in &self.operations {
            if let RenderOp::Text { line, value, .. } = op {
                if lines.len() <= *line {
                    lines.resize(*line + 1, String::new());
                }
                lines[*line].push_str(value);
            }
        }
        lines
    }

    /// Runs drawn in `color`.
    pub fn runs_with_color(&self, color: Color) -> impl Iterator<Item = &str> {
        self.operations.iter().filter_map(move |op| match op {
            RenderOp::Text {
                value, color: c, ..
            } if *c == color => Some(value.as_str()),
            _ => None,
        })
    }
}

/// A lightweight renderer that lays out the displayed text of a control and
/// materialises per-run text commands.
#[derive(Default)]
pub struct HeadlessRenderer;

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders `control` with its top-left corner at `origin`. Controls that
    /// were never laid out produce an empty scene.
    pub fn render<M: TextMeasurer>(
        &self,
        control: &ExpandableText<M>,
        origin: Point,
    ) -> RecordedRenderScene {
        let Some(layout) = control.displayed_layout() else {
            return RecordedRenderScene::default();
        };
        let displayed = control.displayed();
        let base_color = control.config().style.color.unwrap_or(Color::BLACK);

        let mut operations = Vec::new();
        let clip = displayed
            .height
            .map(|height| Rect::new(origin.x, origin.y, layout.size().width, height));
        if let Some(rect) = clip {
            operations.push(RenderOp::Clip { rect });
        }

        for (index, line) in layout.lines().iter().enumerate() {
            let top = origin.y + line.top;
            if clip.is_some_and(|clip| top >= clip.bottom()) {
                break;
            }
            for (range, color) in styled_runs(&displayed.text, line.start..line.visible_end, base_color)
            {
                let (left, right) = run_extent(&layout, line, &range);
                operations.push(RenderOp::Text {
                    line: index,
                    rect: Rect::new(origin.x + left, top, right - left, line.height()),
                    value: displayed.text.as_str()[range].to_string(),
                    color,
                });
            }
        }

        RecordedRenderScene::new(operations)
    }
}

/// Splits `window` at span boundaries; the innermost colored span wins.
fn styled_runs(
    text: &AnnotatedString,
    window: Range<usize>,
    base_color: Color,
) -> SmallVec<[(Range<usize>, Color); 4]> {
    let mut cuts: SmallVec<[usize; 8]> = smallvec![window.start, window.end];
    for span in text.span_styles() {
        for boundary in [span.range.start, span.range.end] {
            if boundary > window.start && boundary < window.end {
                cuts.push(boundary);
            }
        }
    }
    cuts.sort_unstable();
    cuts.dedup();

    cuts.windows(2)
        .map(|pair| {
            let run = pair[0]..pair[1];
            let color = text
                .span_styles()
                .iter()
                .rev()
                .filter(|span| span.range.start <= run.start && run.end <= span.range.end)
                .find_map(|span| span.style.color)
                .unwrap_or(base_color);
            (run, color)
        })
        .collect()
}

fn run_extent(layout: &TextLayoutResult, line: &LineMetrics, range: &Range<usize>) -> (f32, f32) {
    let start = layout.cursor_rect(range.start).x;
    // the visible end can coincide with the next line's start
    let end = if range.end >= line.visible_end {
        match line.direction {
            ResolvedTextDirection::Ltr => line.right(),
            ResolvedTextDirection::Rtl => line.left,
        }
    } else {
        layout.cursor_rect(range.end).x
    };
    (start.min(end), start.max(end))
}
