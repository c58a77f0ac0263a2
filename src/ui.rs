use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::session::SessionState;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.session().state() {
            SessionState::Completed => render_results(self, area, buf),
            SessionState::Paused => {
                render_typing(self, area, buf);
                render_paused(area, buf);
            }
            SessionState::Idle | SessionState::Running => render_typing(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let session = app.session();
    let Some(question) = session.current_question() else {
        return;
    };
    let progress = session.progress();
    let feedback = app.feedback();

    let max_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let text_width = question.input_text().width() + session.pending_input().width();
    let prompt_lines = if text_width <= max_width as usize {
        1
    } else {
        (text_width as f64 / max_width as f64).ceil() as u16 + 1
    };
    let show_display = question.display_text() != question.input_text();
    let display_lines = if show_display { 2 } else { 0 };
    let padding = area
        .height
        .saturating_sub(prompt_lines + display_lines + 4)
        / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(padding),
            Constraint::Length(display_lines),
            Constraint::Length(prompt_lines),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Paragraph::new(Span::styled(
        format!(
            "{}  [{}]  question {}/{}",
            app.set_name(),
            session.input_mode(),
            progress.question_index + 1,
            progress.total_questions
        ),
        Style::default().add_modifier(Modifier::DIM),
    ));
    header.render(chunks[0], buf);

    if show_display {
        Paragraph::new(Span::styled(
            question.display_text().to_string(),
            bold().fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }

    let mut remaining = progress.remaining_text.chars();
    let current = remaining.next();
    let cursor_style = if feedback.miss_flash > 0 {
        bold().fg(Color::White).bg(Color::Red)
    } else {
        dim_bold().add_modifier(Modifier::UNDERLINED)
    };

    let mut spans = vec![Span::styled(
        progress.typed_text.clone(),
        bold().fg(Color::Green),
    )];
    if !session.pending_input().is_empty() {
        spans.push(Span::styled(
            session.pending_input().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
        ));
    }
    if let Some(c) = current {
        spans.push(Span::styled(c.to_string(), cursor_style));
    }
    spans.push(Span::styled(remaining.as_str().to_string(), dim_bold()));

    Paragraph::new(Line::from(spans))
        .alignment(if prompt_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    let status = Paragraph::new(Span::styled(
        format!(
            "{:.1}% acc   {} correct   {} miss   {:.0}% done",
            progress.accuracy() * 100.0,
            progress.correct_count,
            progress.miss_count,
            progress.progress_rate() * 100.0
        ),
        dim_bold(),
    ))
    .alignment(Alignment::Center);
    status.render(chunks[4], buf);

    let legend = Paragraph::new(Span::styled(
        "(tab) skip / (ctrl+p) pause / (ctrl+e) end / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ));
    legend.render(chunks[6], buf);
}

fn render_paused(area: Rect, buf: &mut Buffer) {
    let width = area.width.min(36);
    let height = area.height.min(3);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    Clear.render(popup, buf);
    Paragraph::new(Span::styled(
        "PAUSED - ctrl+p to resume",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
    .render(popup, buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let feedback = app.feedback();
    let Some(results) = feedback.results else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let accuracy = results.accuracy() * 100.0;
    let accuracy_style = if accuracy >= 95.0 {
        bold().fg(Color::Green)
    } else if accuracy >= 80.0 {
        bold().fg(Color::Yellow)
    } else {
        bold().fg(Color::Red)
    };

    Paragraph::new(Line::from(vec![
        Span::styled(format!("{} correct   ", results.total_correct_count), bold()),
        Span::styled(format!("{} miss   ", results.total_miss_count), bold()),
        Span::styled(format!("{accuracy:.1}% acc"), accuracy_style),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!(
            "{}/{} questions completed",
            results.completed_questions, results.total_questions
        ),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(r)etry / (n)ew / (q)uit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[4], buf);
}
