use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event};
use geoclock::engine::{ClockSource, FixedClock, SystemClock, Viewport};
use geoclock::{Engine, FrameState};
use ratatui::layout::Rect;
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::app::{handle_input, App};
use crate::terminal::ClockTerminal;
use crate::ui;

/// Settings for a run without a terminal.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessOptions {
    pub frames: u32,
    pub tick_ms: u64,
    pub viewport: Viewport,
    pub json: bool,
}

#[derive(Serialize)]
struct HeadlessReport {
    frames: u32,
    tick_ms: u64,
    elapsed_ms: u64,
    frame: FrameState,
}

/// Steps the engine `frames` times against a frozen wall clock and returns the last frame.
pub fn simulate(
    engine: &mut Engine,
    clock: &mut FixedClock,
    options: &HeadlessOptions,
) -> FrameState {
    let mut frame = engine.frame(&*clock, options.viewport);
    for _ in 0..options.frames {
        clock.advance(options.tick_ms);
        frame = engine.tick(&*clock, options.tick_ms, options.viewport, &[]);
    }
    frame
}

/// Run the clock without a UI and print the final frame.
pub fn run_headless(engine: &mut Engine, options: &HeadlessOptions) -> Result<()> {
    let wall = SystemClock::new().wall_time();
    let mut clock = FixedClock::new(wall.hour, wall.minute, wall.second, 0);
    log::debug!(
        "headless run: {} frames at {}ms, viewport {}x{}",
        options.frames,
        options.tick_ms,
        options.viewport.width,
        options.viewport.height
    );

    let frame = simulate(engine, &mut clock, options);

    if options.json {
        let report = HeadlessReport {
            frames: options.frames,
            tick_ms: options.tick_ms,
            elapsed_ms: engine.elapsed_ms(),
            frame,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_summary(&frame, engine.elapsed_ms())?);
    }

    Ok(())
}

pub fn render_summary(frame: &FrameState, elapsed_ms: u64) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_summary(&mut out, frame, elapsed_ms)?;
    Ok(out)
}

fn write_summary(out: &mut String, frame: &FrameState, elapsed_ms: u64) -> fmt::Result {
    writeln!(out, "\nGeoClock Frame")?;
    writeln!(out, "==============")?;
    writeln!(out, "Time: {}", frame.time_label)?;
    writeln!(out, "Mode: {}", frame.time_mode_label())?;
    writeln!(out, "Roulette: {}", frame.roulette_label())?;
    writeln!(out, "Phase: {}", frame.phase_label())?;
    writeln!(out, "Cycle: {:.2}s after {elapsed_ms}ms", frame.cycle_time)?;
    writeln!(
        out,
        "Alpha: geo {} / tri {}",
        frame.alphas.geo, frame.alphas.tri
    )?;
    writeln!(
        out,
        "Viewport: {}x{} (scale {:.3})",
        frame.viewport.width, frame.viewport.height, frame.transform.scale
    )?;

    writeln!(out, "\nMarkers:")?;
    let markers = &frame.markers;
    for (name, point) in [
        ("hour", markers.hour),
        ("minute", markers.minute),
        ("second", markers.second),
    ] {
        writeln!(out, "- {name}: ({:.1}, {:.1})", point.x, point.y)?;
    }

    writeln!(
        out,
        "\nAngles: {:.2} + {:.2} + {:.2} = {:.2}",
        frame.angles.at_hour,
        frame.angles.at_minute,
        frame.angles.at_second,
        frame.angles.sum()
    )
}

fn viewport_for(width: u16, height: u16) -> Viewport {
    ui::canvas_viewport(Rect::new(0, 0, width, height))
}

/// Run the main application event loop
pub async fn run(terminal: &mut ClockTerminal, app: &mut App, tick_rate: Duration) -> Result<()> {
    let mut ticker = tokio::time::interval(tick_rate);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let size = terminal.size()?;
    app.viewport = viewport_for(size.width, size.height);

    while app.running {
        ticker.tick().await;

        app.update();

        terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| eyre!("Terminal draw error: {e}"))?;

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => handle_input(app, key),
                Event::Resize(width, height) => {
                    log::debug!("resized to {width}x{height}");
                    app.viewport = viewport_for(width, height);
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }

            if !app.running {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoclock::{ClockCommand, TimeMode};

    fn options(frames: u32) -> HeadlessOptions {
        HeadlessOptions {
            frames,
            tick_ms: 100,
            viewport: Viewport::new(1000.0, 800.0),
            json: false,
        }
    }

    #[test]
    fn simulate_advances_elapsed_time() {
        let mut engine = Engine::new(1);
        let mut clock = FixedClock::new(8, 0, 0, 0);
        let frame = simulate(&mut engine, &mut clock, &options(30));

        assert_eq!(engine.elapsed_ms(), 3000);
        assert!((frame.cycle_time - 3.0).abs() < 1e-9);
        assert_eq!(frame.time_mode, TimeMode::Live);
    }

    #[test]
    fn zero_frames_reports_the_initial_state() {
        let mut engine = Engine::new(1);
        let mut clock = FixedClock::new(8, 0, 0, 0);
        let frame = simulate(&mut engine, &mut clock, &options(0));

        assert_eq!(engine.elapsed_ms(), 0);
        assert_eq!(frame.time_label, "08:00:00");
    }

    #[test]
    fn summary_lists_time_and_angles() {
        let mut engine = Engine::new(1);
        let mut clock = FixedClock::new(8, 0, 0, 0);
        engine.apply(ClockCommand::PhaseSelect(geoclock::PhaseMode::Tri), 0);
        let frame = simulate(&mut engine, &mut clock, &options(1));
        let summary = render_summary(&frame, engine.elapsed_ms()).unwrap();

        assert!(summary.contains("Time: 08:00:00"));
        assert!(summary.contains("Phase: MANUAL(TRI)"));
        assert!(summary.contains("Angles:"));
        assert!(summary.contains("- minute:"));
    }

    #[test]
    fn report_serializes_frame() {
        let mut engine = Engine::new(1);
        let mut clock = FixedClock::new(8, 0, 0, 0);
        let frame = simulate(&mut engine, &mut clock, &options(2));
        let report = HeadlessReport {
            frames: 2,
            tick_ms: 100,
            elapsed_ms: engine.elapsed_ms(),
            frame,
        };
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["frames"], 2);
        assert_eq!(json["elapsed_ms"], 200);
        assert!(json["frame"]["hour_shape"].is_array());
    }
}
