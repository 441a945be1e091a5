use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use crate::commands::Category;
use super::app::{App, Speaker};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Transcript
            Constraint::Length(3), // Input
            Constraint::Length(1)  // Help
        ].as_ref())
        .split(f.area());

    let mut lines: Vec<Line> = Vec::new();
    for bubble in &app.transcript {
        let (name, alignment, color) = match bubble.speaker {
            Speaker::User => ("You", Alignment::Right, Color::Cyan),
            Speaker::Meep => ("Meep", Alignment::Left, category_color(bubble.category)),
        };
        lines.push(
            Line::from(Span::styled(name, Style::default().fg(color).add_modifier(Modifier::BOLD)))
                .alignment(alignment),
        );
        for text in bubble.text.lines() {
            let text = text.replace('\t', "    ");
            lines.push(Line::from(Span::styled(text, Style::default().fg(color))).alignment(alignment));
        }
        lines.push(Line::from(""));
    }

    let height = chunks[0].height.saturating_sub(2);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(height);
    app.scroll = app.scroll.min(max_offset);
    let offset = max_offset - app.scroll;

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .block(Block::default().borders(Borders::ALL).title("Meep"));
    f.render_widget(transcript, chunks[0]);

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Say something"));
    f.render_widget(input, chunks[1]);

    let help_text = if app.show_help {
        "Esc/F1/Enter: Close Help"
    } else {
        "Enter: Send | F1: Help | Up/Down: Scroll | Esc: Quit"
    };
    let help = Paragraph::new(help_text).style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[2]);

    if app.show_help {
        let area = centered_rect(70, 80, f.area());
        f.render_widget(Clear, area);
        let text = app.help_text.replace('\t', "    ");
        let popup = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Help"));
        f.render_widget(popup, area);
    }
}

/// Colour for a Meep bubble, keyed off the command that produced it.
fn category_color(category: Option<Category>) -> Color {
    match category {
        Some(Category::Error) | Some(Category::Unknown) => Color::Red,
        Some(Category::AddTask) | Some(Category::Mark) | Some(Category::Unmark) => Color::Green,
        Some(Category::Delete) => Color::Magenta,
        Some(Category::Save) | Some(Category::Load) => Color::Blue,
        Some(Category::CheckDue) | Some(Category::Find) => Color::Yellow,
        Some(Category::Help) | Some(Category::ListTasks) | Some(Category::ListMessages) => Color::White,
        _ => Color::LightGreen,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
