use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Gauge, Paragraph, Wrap};

use crate::output::format_score;
use crate::prompt::progress_percent;
use crate::tui::app::{App, InputMode};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Gauge(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Progress gauge
        Constraint::Fill(1),   // Question or results
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_progress(frame, chunks[1], app);
    if app.is_complete() {
        render_results(frame, chunks[2], app);
    } else {
        render_question(frame, chunks[2], app);
    }
    render_status_bar(frame, chunks[3], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = "Biosecurity Risk Assessment";
    let mut spans = vec![Span::styled(
        title,
        Style::default().fg(app.theme.title_color).bold(),
    )];

    // Question counter on the right
    let count = app.engine.questions().len();
    let counter = if app.is_complete() {
        "Results".to_string()
    } else {
        format!("Question {} of {}", app.session.current_index() + 1, count)
    };
    let padding_len = (area.width as usize).saturating_sub(title.len() + counter.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(counter, Style::default().fg(app.theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let percent = if app.is_complete() {
        100
    } else {
        progress_percent(app.session.current_index(), app.engine.questions().len())
    };

    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.gauge_filled)
                .bg(app.theme.gauge_empty),
        )
        .percent(percent.min(100))
        .label(format!("{}% Complete", percent));

    frame.render_widget(gauge, area);
}

fn render_question(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };
    let recorded = app.session.answer_for(question.id);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(question.text.clone(), app.theme.question_style)),
        Line::from(""),
    ];

    for (i, option) in question.options.iter().enumerate() {
        let chosen = recorded == Some(option.score);
        let marker = if chosen { "(•) " } else { "( ) " };
        let marker_style = if chosen {
            Style::default().fg(app.theme.answer_marker).bold()
        } else {
            Style::default().fg(app.theme.muted)
        };

        let label_style = if i == app.cursor {
            app.theme.option_cursor
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(marker, marker_style),
            Span::styled(option.label.clone(), label_style),
        ]));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default());
    frame.render_widget(body, area);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let result = app.result();
    let tier_style = Style::default().fg(app.theme.tier_color(result.tier)).bold();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("{} Risk", result.tier), tier_style)),
        Line::from(Span::styled(
            format!(
                "Score: {}",
                format_score(result.total_score, result.max_possible_score, result.incomplete)
            ),
            Style::default().fg(app.theme.muted),
        )),
        Line::from(""),
        Line::from(Span::styled("Recommendations:", Style::default().bold())),
    ];

    for rec in result.recommendations() {
        lines.push(Line::from(format!("  • {}", rec)));
    }

    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        // Show flash message with color based on message type
        let msg_color = if msg.starts_with("Please") || msg.starts_with("Error") {
            app.theme.flash_error
        } else {
            app.theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let on_last = app.session.current_index() + 1 == app.engine.questions().len();
        let hints: Vec<(&str, &str)> = if app.is_complete() {
            vec![("r", ":restart "), ("?", ":help "), ("q", ":quit")]
        } else {
            vec![
                ("j/k", ":choose "),
                ("Enter", if on_last { ":answer+finish " } else { ":answer+next " }),
                ("Space", ":answer "),
                ("n/p", ":next/prev "),
                ("r", ":restart "),
                ("?", ":help "),
                ("q", ":quit"),
            ]
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(app.theme.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(app.theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(46, 12, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", app.theme.popup_title))
        .border_style(Style::default().fg(app.theme.popup_border));
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);

    let rows = [
        ("j / Down      ", "Next option"),
        ("k / Up        ", "Previous option"),
        ("Space         ", "Record highlighted answer"),
        ("Enter         ", "Record answer and continue"),
        ("n / Right     ", "Next question"),
        ("p / Left      ", "Previous question"),
        ("r             ", "Restart assessment"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = rows
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(*key, app.theme.popup_key),
                Span::raw(*desc),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
