//! Debug utilities for inspecting rendered frames
//!
//! # Usage
//!
//! ```rust,ignore
//! use readmore_ui::{log_render_scene, HeadlessRenderer};
//!
//! let scene = HeadlessRenderer::new().render(&control, Point::default());
//! log_render_scene(&scene);
//! ```

use crate::renderer::{RecordedRenderScene, RenderOp};
use std::fmt::Write;

/// Logs the render scene to stdout showing all draw operations
pub fn log_render_scene(scene: &RecordedRenderScene) {
    println!("\n=== RENDER SCENE ===");
    print!("{}", format_render_scene(scene));
    println!("=== END RENDER SCENE ===\n");
}

/// Formats the render scene as one line per operation
pub fn format_render_scene(scene: &RecordedRenderScene) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Total operations: {}", scene.operations().len());

    for (idx, op) in scene.operations().iter().enumerate() {
        match op {
            RenderOp::Clip { rect } => {
                let _ = writeln!(
                    output,
                    "[{}] Clip ({:.1}, {:.1}) {:.1}x{:.1}",
                    idx, rect.x, rect.y, rect.width, rect.height
                );
            }
            RenderOp::Text {
                line,
                rect,
                value,
                color,
            } => {
                let _ = writeln!(
                    output,
                    "[{}] Line {} - Text at ({:.1}, {:.1}) #{:08X}: \"{}\"",
                    idx,
                    line,
                    rect.x,
                    rect.y,
                    color.to_argb(),
                    value
                );
            }
        }
    }
    output
}
