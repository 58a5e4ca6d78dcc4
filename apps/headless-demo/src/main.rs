use anyhow::{bail, Context};
use clap::Parser;
use readmore::prelude::*;
use readmore::{format_render_scene, AnimationStatus, ExpandableTextConfig, FRAME_INTERVAL};
use std::time::Duration;

const SAMPLE_TEXT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
    eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
    quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

/// Frames printed before the demo gives up on an animation.
const MAX_FRAMES: usize = 240;

#[derive(Debug, Parser)]
#[command(name = "headless-demo")]
#[command(about = "Prints every frame of an expand/collapse cycle")]
struct DemoArgs {
    /// Width available to the text, in pixels
    #[arg(long, default_value_t = 300.0)]
    width: f32,

    /// Lines shown while collapsed
    #[arg(long = "lines", default_value_t = 3)]
    collapsed_lines: usize,

    /// Label appended after the ellipsis
    #[arg(long, default_value = "Read more")]
    action: String,

    /// Sleep between frames and use wall-clock frame times
    #[arg(long)]
    realtime: bool,

    /// Shape with system fonts instead of the fixed-advance measurer
    #[arg(long)]
    cosmic: bool,
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    let _ = env_logger::try_init();

    let args = DemoArgs::parse();
    log::info!("headless demo starting with {args:?}");

    if args.cosmic {
        return run_cosmic(&args);
    }
    run(readmore::testing::MonospaceMeasurer::new(), &args)
}

#[cfg(feature = "cosmic")]
fn run_cosmic(args: &DemoArgs) -> anyhow::Result<()> {
    let measurer = readmore::CosmicTextMeasurer::new();
    if !measurer.has_fonts() {
        bail!("no system fonts found");
    }
    run(measurer, args)
}

#[cfg(not(feature = "cosmic"))]
fn run_cosmic(_args: &DemoArgs) -> anyhow::Result<()> {
    bail!("--cosmic requires the `cosmic` feature")
}

fn run<M: TextMeasurer>(measurer: M, args: &DemoArgs) -> anyhow::Result<()> {
    let config = ExpandableTextConfig::new()
        .with_collapsed_max_lines(args.collapsed_lines)
        .with_expand_action(args.action.as_str())
        .with_action_color(Color::PURPLE);
    let mut control = ExpandableText::with_config(measurer, SAMPLE_TEXT, config)
        .context("invalid demo configuration")?;
    control.set_on_toggle(|state| println!("-- toggled to {state:?}"));
    control.on_layout(args.width);

    let renderer = HeadlessRenderer::new();
    println!("== initial ({:?})", control.state());
    println!("{}", format_render_scene(&renderer.render(&control, Point::default())));

    if !control.click() {
        println!("text fits in {} lines, nothing to expand", args.collapsed_lines);
        return Ok(());
    }
    animate(&mut control, &renderer, args.realtime)?;

    control.click();
    animate(&mut control, &renderer, args.realtime)?;
    Ok(())
}

fn animate<M: TextMeasurer>(
    control: &mut ExpandableText<M>,
    renderer: &HeadlessRenderer,
    realtime: bool,
) -> anyhow::Result<()> {
    let clock = FrameClock::new();
    let mut virtual_time = 0u64;
    for frame in 0..MAX_FRAMES {
        let frame_time_nanos = if realtime {
            std::thread::sleep(FRAME_INTERVAL);
            clock.frame_time_nanos()
        } else {
            virtual_time += FRAME_INTERVAL.as_nanos() as u64;
            virtual_time
        };
        let status = control.tick(frame_time_nanos);
        let height = control.current_height().unwrap_or_default();
        println!(
            "== frame {frame} at {:?}: height {height:.1}",
            Duration::from_nanos(frame_time_nanos)
        );
        println!("{}", format_render_scene(&renderer.render(control, Point::default())));
        if matches!(status, AnimationStatus::Finished { .. } | AnimationStatus::Idle) {
            return Ok(());
        }
    }
    bail!("animation did not settle within {MAX_FRAMES} frames")
}
