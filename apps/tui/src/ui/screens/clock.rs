use crate::app::App;
use crate::ui::widgets::composition::render_composition;
use geoclock::engine::Viewport;
use geoclock::FrameState;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;

const STATUS_WIDTH: u16 = 34;

/// Braille dots per terminal cell.
const DOTS_X: f64 = 2.0;
const DOTS_Y: f64 = 4.0;

pub struct ClockLayout {
    pub title: Rect,
    pub canvas: Rect,
    pub status: Rect,
    pub shortcuts: Rect,
}

pub fn build_layout(area: Rect) -> ClockLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Canvas and status
            Constraint::Length(1), // Shortcuts
        ])
        .split(area.inner(Margin::new(1, 0)));

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(STATUS_WIDTH)])
        .split(rows[1]);

    ClockLayout {
        title: rows[0],
        canvas: body[0],
        status: body[1],
        shortcuts: rows[2],
    }
}

/// Drawable canvas area, inside the canvas block's border.
pub fn canvas_inner(area: Rect) -> Rect {
    build_layout(area).canvas.inner(Margin::new(1, 1))
}

/// Viewport for a terminal of `area`, in braille dots.
pub fn canvas_viewport(area: Rect) -> Viewport {
    let inner = canvas_inner(area);
    Viewport::new(
        f64::from(inner.width) * DOTS_X,
        f64::from(inner.height) * DOTS_Y,
    )
}

pub fn render_clock(app: &App, f: &mut Frame<'_>) {
    let layout = build_layout(f.area());

    render_title(f, layout.title);
    render_canvas(app, f, layout.canvas);
    render_status(app, f, layout.status);
    render_shortcuts(f, layout.shortcuts);
}

fn render_title(f: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Geo",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Clock",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn render_canvas(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(block, area);

    if let Some(frame) = app.frame.as_ref() {
        render_composition(f, area.inner(Margin::new(1, 1)), frame);
    }
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = app.frame.as_ref().map_or_else(
        || vec![TextLine::from("Starting...")],
        |frame| status_lines(frame, app.animation_seconds()),
    );

    let paragraph = Paragraph::new(Text::from(lines))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);

    if let Ok(mut effect) = app.hint_fx.lock() {
        if let Some(effect) = effect.as_mut() {
            f.buffer_mut().render_effect(effect, area, app.last_tick);
        }
    }
}

pub fn status_lines(frame: &FrameState, animation_seconds: f64) -> Vec<TextLine<'static>> {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        info_line("Time", &frame.time_label, label, value),
        info_line("Mode", frame.time_mode_label(), label, value),
        info_line("Roulette", frame.roulette_label(), label, value),
        info_line("Phase", frame.phase_label(), label, value),
        info_line(
            "Cycle",
            &format!("{:.1}s", frame.cycle_time),
            label,
            value,
        ),
        info_line(
            "Alpha",
            &format!("geo {} / tri {}", frame.alphas.geo, frame.alphas.tri),
            label,
            value,
        ),
        info_line(
            "Scale",
            &format!("{:.3}", frame.transform.scale),
            label,
            value,
        ),
        TextLine::from(""),
        info_line(
            "Angles",
            &format!(
                "{:.1} + {:.1} + {:.1}",
                frame.angles.at_hour, frame.angles.at_minute, frame.angles.at_second
            ),
            label,
            value,
        ),
        info_line("Sum", &format!("{:.1}", frame.angles.sum()), label, value),
    ];

    if let Some(entry) = frame.entry.as_deref() {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            "Set time (H:M[:S]):",
            Style::default().fg(Color::Green),
        )));
        lines.push(TextLine::from(Span::styled(
            format!("> {entry}{}", cursor_char(animation_seconds)),
            value,
        )));
    }

    if frame.hint {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            "Invalid time. Use H:M or H:M:S",
            Style::default().fg(Color::Red),
        )));
    }

    lines
}

fn cursor_char(animation_seconds: f64) -> &'static str {
    if (animation_seconds * std::f64::consts::TAU).sin() > 0.0 {
        "█"
    } else {
        " "
    }
}

fn info_line(
    label: &str,
    value: &str,
    label_style: Style,
    value_style: Style,
) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(format!("{label}: "), label_style),
        Span::styled(value.to_string(), value_style),
    ])
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let paragraph = Paragraph::new(shortcuts_line()).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn shortcuts_line() -> TextLine<'static> {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Gray);

    let entries = [
        ("F1", "Help"),
        ("r", "Reset"),
        ("s", "Roulette"),
        ("1/2/0", "Geo/Tri/Auto"),
        ("p", "Lock"),
        ("t", "Set time"),
        ("q", "Quit"),
    ];

    let mut spans = Vec::with_capacity(entries.len() * 2);
    for (i, (shortcut, action)) in entries.iter().enumerate() {
        spans.push(Span::styled(*shortcut, key));
        let separator = if i + 1 == entries.len() { "" } else { " | " };
        spans.push(Span::styled(format!(": {action}{separator}"), text));
    }
    TextLine::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoclock::engine::FixedClock;
    use geoclock::{ClockCommand, Engine};

    fn sample_frame() -> FrameState {
        let clock = FixedClock::new(10, 15, 30, 0);
        let mut engine = Engine::new(7);
        engine.tick(&clock, 0, Viewport::new(200.0, 100.0), &[])
    }

    fn text_of(lines: &[TextLine<'_>]) -> String {
        lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn viewport_is_measured_in_braille_dots() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = canvas_inner(area);
        let viewport = canvas_viewport(area);
        assert!((viewport.width - f64::from(inner.width) * 2.0).abs() < f64::EPSILON);
        assert!((viewport.height - f64::from(inner.height) * 4.0).abs() < f64::EPSILON);
        assert_eq!(inner.width, 100 - 2 - STATUS_WIDTH - 2);
    }

    #[test]
    fn status_shows_time_and_modes() {
        let text = text_of(&status_lines(&sample_frame(), 0.0));
        assert!(text.contains("Time: 10:15:30"));
        assert!(text.contains("Mode: LIVE"));
        assert!(text.contains("Roulette: OFF"));
        assert!(text.contains("Phase: AUTO"));
        assert!(!text.contains("Set time"));
    }

    #[test]
    fn status_shows_entry_buffer() {
        let clock = FixedClock::new(10, 15, 30, 0);
        let mut engine = Engine::new(7);
        let frame = engine.tick(
            &clock,
            0,
            Viewport::new(200.0, 100.0),
            &[
                ClockCommand::TimeEntryToggle,
                ClockCommand::TimeEntryChar('9'),
            ],
        );
        let text = text_of(&status_lines(&frame, 0.25));
        assert!(text.contains("> 9"));
    }

    #[test]
    fn shortcuts_list_every_key() {
        let text = shortcuts_line().to_string();
        for key in ["F1", "r:", "s:", "p:", "t:", "q:"] {
            assert!(text.contains(key), "missing {key} in {text}");
        }
    }
}
