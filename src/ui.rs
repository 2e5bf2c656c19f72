use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use swiftype::{
    projection::{CharStatus, WordStatus},
    session::EngineState,
    Difficulty,
};

use crate::{App, Screen};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.nav.screen {
            Screen::Typing => render_typing(self, area, buf),
            Screen::Results => render_results(self, area, buf),
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let engine = &app.engine;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let teal_bold_style = Style::default().patch(bold_style).fg(Color::Cyan);
    let gray_style = Style::default().fg(Color::Gray);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_dim_style = dim_style.add_modifier(Modifier::ITALIC);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_width: usize = engine
        .target_words()
        .iter()
        .map(|w| w.width() + 1)
        .sum();
    let prompt_lines = ((prompt_width as f64 / max_chars_per_line as f64).ceil() as u16 + 1)
        .min(area.height.saturating_sub(8).max(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // difficulty selector
            Constraint::Length(1),
            Constraint::Length(prompt_lines),
            Constraint::Length(1),
            Constraint::Length(1), // input buffer
            Constraint::Length(1),
            Constraint::Length(1), // live stats
            Constraint::Length(1), // key help
            Constraint::Min(0),
        ])
        .split(area);

    let mut selector = vec![];
    for difficulty in Difficulty::ALL {
        let label = format!(" {difficulty} ");
        let style = if difficulty == engine.difficulty() {
            Style::default()
                .patch(bold_style)
                .fg(Color::Black)
                .bg(Color::Cyan)
        } else {
            gray_style
        };
        selector.push(Span::styled(label, style));
        selector.push(Span::raw("  "));
    }
    Paragraph::new(Line::from(selector))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let mut spans = vec![];
    for view in engine.word_views() {
        match view.status {
            WordStatus::Correct => spans.push(Span::styled(view.text, green_bold_style)),
            WordStatus::Incorrect => spans.push(Span::styled(view.text, red_bold_style)),
            WordStatus::Current => {
                for (c, status) in view.chars {
                    let style = match status {
                        CharStatus::Matched => teal_bold_style,
                        CharStatus::Mismatched => red_bold_style,
                        CharStatus::Untyped => gray_style,
                    };
                    spans.push(Span::styled(
                        c.to_string(),
                        style.add_modifier(Modifier::UNDERLINED),
                    ));
                }
            }
            WordStatus::Pending => spans.push(Span::styled(view.text, gray_style)),
        }
        spans.push(Span::raw(" "));
    }
    Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    let input = Line::from(vec![
        Span::styled("> ", dim_style),
        Span::styled(engine.current_input(), bold_style),
        Span::styled("▏", dim_style),
    ]);
    Paragraph::new(input).render(chunks[5], buf);

    let stats = engine.stats();
    let mut status = vec![
        Span::raw("time "),
        Span::styled(format!("{:.1}s", engine.displayed_secs()), teal_bold_style),
        Span::raw("   WPM "),
        Span::styled(stats.wpm.to_string(), teal_bold_style),
        Span::raw("   Accuracy "),
        Span::styled(format!("{}%", stats.accuracy), teal_bold_style),
    ];
    match engine.state() {
        EngineState::Paused => status.push(Span::styled(
            "   paused, focus the terminal to resume",
            Style::default().fg(Color::Yellow).patch(bold_style),
        )),
        EngineState::Idle if !app.focused => status.push(Span::styled(
            "   focus the terminal to start",
            Style::default().fg(Color::Yellow),
        )),
        _ => {}
    }
    Paragraph::new(Line::from(status))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);

    Paragraph::new(Span::styled(
        "(tab/F1-F3) difficulty  (enter) submit word  (ctrl+r) restart  (esc) quit",
        italic_dim_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[8], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(result) = app.nav.result.as_ref() else {
        return;
    };

    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let value_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(value, value_style),
        ])
    };

    let lines = vec![
        Line::from(""),
        row("WPM: ", result.wpm.to_string()),
        row("Accuracy: ", format!("{}%", result.accuracy)),
        row("Time: ", format!("{}s", result.time)),
        row("Difficulty: ", result.difficulty.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "(r)etry  (n)ext difficulty  (esc) quit",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )),
    ];

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 44.min(area.width);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .vertical_margin(VERTICAL_MARGIN.min(area.height / 4))
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Your Results "),
        )
        .render(horizontal[1], buf);
}
