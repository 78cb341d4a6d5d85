use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const KEYS: [(&str, &str); 10] = [
    ("F1", "Toggle this help screen"),
    ("r", "Back to live time, cancel roulette and entry"),
    ("s", "Spin the roulette; press again to brake"),
    ("1", "Pin the geometric layer"),
    ("2", "Pin the triangle layer"),
    ("0", "Resume the automatic cycle"),
    ("p", "Lock on the dominant layer, or release the lock"),
    ("t", "Type a time (H:M or H:M:S), Enter to apply"),
    ("Esc", "Cancel time entry / close help"),
    ("q", "Quit"),
];

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        TextLine::from(Span::styled(
            "GeoClock",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Hour on a morphing quadrilateral, minute on a ruler, second on an ellipse."),
        TextLine::from("The view alternates between the shapes and the triangle joining the markers."),
        TextLine::from(""),
    ];

    lines.extend(KEYS.iter().map(|(key, action)| {
        TextLine::from(vec![
            Span::styled(format!("  {key:<4}"), key_style),
            Span::raw(format!(" {action}")),
        ])
    }));

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "Press Esc to close this help screen",
        Style::default().fg(Color::Yellow),
    )));

    let help = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title("== Help & Keyboard Shortcuts ==")
                .title_style(key_style)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    f.render_widget(help, popup);
}
