//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use vox_types::tally;

use crate::state::{
    AppState, AuthFocus, AuthFormState, CreateFocus, CreatePollState, DetailPhase, DetailReady,
    PollDetailState, PollListState, Screen,
};

/// Height of the key-hint line at the bottom.
const HINT_HEIGHT: u16 = 1;

const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(HINT_HEIGHT)])
        .split(frame.area());

    match &app.screen {
        Screen::PollList(list) => render_poll_list(app, list, frame, chunks[0]),
        Screen::PollDetail(detail) => render_poll_detail(app, detail, frame, chunks[0]),
        Screen::CreatePoll(form) => render_create_poll(form, frame, chunks[0]),
        Screen::Login(form) => render_auth_form("Login", form, frame, chunks[0]),
        Screen::Register(form) => render_auth_form("Register", form, frame, chunks[0]),
    }

    render_hints(app, frame, chunks[1]);
}

fn render_hints(app: &AppState, frame: &mut Frame, area: Rect) {
    let hints = match &app.screen {
        Screen::PollList(_) => {
            if app.user.is_some() {
                "↑/↓ select · Enter open · n new poll · g refresh · o logout · q quit"
            } else {
                "↑/↓ select · Enter open · l login · r register · g refresh · q quit"
            }
        }
        Screen::PollDetail(_) => "↑/↓ pick option · Enter vote · Esc back · q quit",
        Screen::CreatePoll(_) => {
            "Tab next field · Ctrl+N add option · Ctrl+D remove option · Enter submit · Esc cancel"
        }
        Screen::Login(_) | Screen::Register(_) => "Tab switch field · Enter submit · Esc cancel",
    };
    frame.render_widget(Paragraph::new(hints).style(DIM_STYLE), area);
}

fn render_poll_list(app: &AppState, list: &PollListState, frame: &mut Frame, area: Rect) {
    let title = match &app.user {
        Some(user) => format!("Active Polls — {}", user.username),
        None => "Active Polls".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if list.loading {
        frame.render_widget(Paragraph::new("Loading polls..."), inner);
        return;
    }
    if list.polls.is_empty() {
        frame.render_widget(Paragraph::new("No polls yet."), inner);
        return;
    }

    let lines: Vec<Line> = list
        .polls
        .iter()
        .enumerate()
        .map(|(i, poll)| {
            let marker = if i == list.selected { "> " } else { "  " };
            let style = if i == list.selected {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{}", poll.title), style),
                Span::styled(
                    format!("  ({} options)", poll.options.len()),
                    DIM_STYLE,
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_poll_detail(app: &AppState, detail: &PollDetailState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Poll {}", detail.poll_id));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let ready = match &detail.phase {
        DetailPhase::Loading => {
            frame.render_widget(Paragraph::new("Loading..."), inner);
            return;
        }
        DetailPhase::NotFound => {
            frame.render_widget(Paragraph::new("Poll not found").style(ERROR_STYLE), inner);
            return;
        }
        DetailPhase::Ready(ready) => ready,
    };

    let mut header = vec![
        Line::from(Span::styled(
            ready.poll.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(ready.poll.description.clone()),
        Line::from(Span::styled(
            format!("Ends: {}", ready.poll.end_date.format("%Y-%m-%d %H:%M")),
            DIM_STYLE,
        )),
    ];
    if let Some(error) = &ready.error {
        header.push(Line::from(Span::styled(error.clone(), ERROR_STYLE)));
    }
    if app.user.is_none() {
        header.push(Line::from(Span::styled(
            "Please log in to vote",
            DIM_STYLE,
        )));
    } else if ready.voting {
        header.push(Line::from("Submitting Vote..."));
    } else {
        header.push(Line::from("Cast your vote:"));
    }

    for (i, option) in ready.poll.options.iter().enumerate() {
        let picked = ready.selected == Some(i);
        let marker = if picked { "(•) " } else { "( ) " };
        let style = if picked { SELECTED_STYLE } else { Style::default() };
        header.push(Line::from(Span::styled(
            format!("{marker}{}", option.text),
            style,
        )));
    }

    let header_height = u16::try_from(header.len()).unwrap_or(u16::MAX).saturating_add(1);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(inner);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    render_results(ready, frame, chunks[1]);
}

/// Renders one percentage bar per result row.
fn render_results(ready: &DetailReady, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::TOP).title("Results");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total = tally::total_votes(&ready.results);
    let mut constraints = vec![Constraint::Length(2); ready.results.len()];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (option, row) in ready.results.iter().zip(rows.iter()) {
        let votes = option.votes.unwrap_or(0);
        let pct = tally::percentage(votes, total);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(f64::from(pct) / 100.0)
            .label(format!("{} — {votes} votes ({pct}%)", option.text));
        frame.render_widget(gauge, *row);
    }
}

fn render_create_poll(form: &CreatePollState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Create New Poll");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.clone(), ERROR_STYLE)));
    }
    lines.push(field_line("Title", &form.title, form.focus == CreateFocus::Title));
    lines.push(field_line(
        "Description",
        &form.description,
        form.focus == CreateFocus::Description,
    ));
    lines.push(field_line(
        "End date",
        &form.end_date,
        form.focus == CreateFocus::EndDate,
    ));
    lines.push(Line::from(Span::styled("Options", DIM_STYLE)));
    for (i, option) in form.options.iter().enumerate() {
        lines.push(field_line(
            &format!("Option {}", i + 1),
            option,
            form.focus == CreateFocus::Option(i),
        ));
    }
    if form.submitting {
        lines.push(Line::from("Creating Poll..."));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_auth_form(title: &str, form: &AuthFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let masked = "*".repeat(form.password.chars().count());
    let mut lines = Vec::new();
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.clone(), ERROR_STYLE)));
    }
    lines.push(field_line(
        "Username",
        &form.username,
        form.focus == AuthFocus::Username,
    ));
    lines.push(field_line(
        "Password",
        &masked,
        form.focus == AuthFocus::Password,
    ));
    if form.submitting {
        lines.push(Line::from("Submitting..."));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
    frame.render_widget(paragraph, inner);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused { SELECTED_STYLE } else { Style::default() };
    Line::from(vec![
        Span::styled(format!("{label}: "), style),
        Span::raw(value.to_string()),
        Span::styled(if focused { "▏" } else { "" }, style),
    ])
}
