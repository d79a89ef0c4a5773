use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use trainlog::aggregate::summarize;

use crate::form::{App, ExerciseField, ExerciseModal, Flow, Mode};

/// Redraw at least this often so a finished catalog fetch shows up without a key press.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn input_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}

fn draw_draft(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(area);

    let name = Paragraph::new(app.draft.name.as_str())
        .style(input_style(matches!(app.mode, Mode::EditingName)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Training Name"),
        );
    frame.render_widget(name, chunks[0]);

    let title = format!("Exercises ({} added)", app.draft.exercises().len());
    if app.draft.exercises().is_empty() {
        let empty_msg = Paragraph::new("No exercises yet.\nPress 'a' to add one!")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(empty_msg, chunks[1]);
    } else {
        let items: Vec<ListItem> = app
            .draft
            .exercises()
            .iter()
            .map(|exercise| ListItem::new(exercise.to_string()))
            .collect();
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(list, chunks[1]);
    }
}

fn draw_trainings(frame: &mut Frame, app: &App, area: Rect) {
    let trainings = app.sorted_trainings();
    let title = format!(
        "Trainings by volume, {} ({} total)",
        app.state.sort_order(),
        trainings.len()
    );

    if trainings.is_empty() {
        let empty_msg = Paragraph::new("No trainings saved.\nName one, add exercises, press 's'.")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(empty_msg, area);
        return;
    }

    let items: Vec<ListItem> = trainings
        .iter()
        .enumerate()
        .map(|(idx, training)| {
            let mut lines = vec![Line::from(training.name().to_string())];
            lines.extend(
                training
                    .exercises()
                    .iter()
                    .map(|exercise| Line::from(format!("  {}", exercise))),
            );
            lines.push(Line::from(format!("  {}", summarize(training))));

            let style = if idx == app.selected {
                selected_style()
            } else {
                Style::default()
            };
            ListItem::new(Text::from(lines)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    let mut list_state = ListState::default();
    list_state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn field_widget(modal: &ExerciseModal, field: ExerciseField) -> Paragraph<'_> {
    Paragraph::new(modal.value(field))
        .style(input_style(modal.field == field))
        .block(Block::default().borders(Borders::ALL).title(field.label()))
}

fn draw_modal(frame: &mut Frame, modal: &ExerciseModal) {
    let area = popup_area(frame.area(), 60, 80);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Add Exercise")
        .style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(field_widget(modal, ExerciseField::Name), chunks[0]);

    if modal.is_loading() {
        let loading = Paragraph::new("Searching...").style(Style::default().fg(Color::Gray));
        frame.render_widget(loading, chunks[1]);
    } else {
        let suggestions = modal.suggestions();
        let items: Vec<ListItem> = suggestions
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let style = if idx == modal.highlighted {
                    selected_style()
                } else {
                    Style::default()
                };
                ListItem::new(entry.name.as_str()).style(style)
            })
            .collect();
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(modal.highlighted));
        }
        frame.render_stateful_widget(List::new(items), chunks[1], &mut list_state);
    }

    frame.render_widget(field_widget(modal, ExerciseField::Sets), chunks[2]);
    frame.render_widget(field_widget(modal, ExerciseField::Reps), chunks[3]);
    frame.render_widget(field_widget(modal, ExerciseField::Weight), chunks[4]);

    if let Some(error) = &modal.error {
        let error = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(error, chunks[5]);
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(3),
    ])
    .split(frame.area());

    // Header
    let header = Paragraph::new("Trainlog - Training Form")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let body = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);
    draw_draft(frame, app, body[0]);
    draw_trainings(frame, app, body[1]);

    // Footer with status
    let footer = Paragraph::new(app.status_message.as_str())
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(footer, chunks[2]);

    if let Mode::AddingExercise(modal) = &app.mode {
        draw_modal(frame, modal);
    }
}

pub async fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        app.poll().await;
        terminal.draw(|frame| draw(frame, &app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Flow::Quit = app.handle_key(key.code) {
                return Ok(());
            }
        }
    }
}
