// ============================================================
// Layer 1 — Terminal Form
// ============================================================
// Draws the screening form with ratatui and feeds key presses
// into the form state machine (Layer 2).
//
//   ┌ title ───────────────────────────────────────────────┐
//   ├ Student Profile ─┬ Burnout Index ─┬ Total Stress ────┤
//   │  six sliders     ├ [ Enter ] Analyze Risk ───────────┤
//   │                  ├ Assessment Results ───────────────┤
//   └──────────────────┴───────────────────────────────────┘
//
// The loop blocks on the next key, applies it, and redraws from
// a fresh view. Nothing here decides anything about the profile.

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{execute, terminal};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::application::assess_use_case::AssessUseCase;
use crate::application::context::AssessmentContext;
use crate::application::form::{self, ControlView, FormAction, FormState, FormView, Outcome};
use crate::application::presenter;

type Term = Terminal<CrosstermBackend<Stdout>>;

const SIDEBAR_WIDTH: u16 = 44;

/// Run the form until the user quits. The terminal is restored on
/// every exit path, including errors from the loop.
pub fn run(ctx: &AssessmentContext) -> Result<()> {
    let mut term = enter().context("Failed to prepare the terminal")?;
    let outcome  = event_loop(&mut term, ctx);
    let restored = leave(&mut term).context("Failed to restore the terminal");
    outcome.and(restored)
}

fn enter() -> Result<Term> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    let prepared = execute!(stdout, terminal::EnterAlternateScreen)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));
    unwind_on_err(prepared, || {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    })
}

/// Run `undo` before handing back a setup failure
fn unwind_on_err<T>(result: io::Result<T>, undo: impl FnOnce()) -> Result<T> {
    result.map_err(|e| {
        undo();
        e.into()
    })
}

fn leave(term: &mut Term) -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(term.backend_mut(), terminal::LeaveAlternateScreen)?;
    term.show_cursor()?;
    Ok(())
}

fn event_loop(term: &mut Term, ctx: &AssessmentContext) -> Result<()> {
    let use_case  = AssessUseCase::new(ctx);
    let mut state = FormState::default();

    loop {
        let view = form::view(&state);
        term.draw(|f| draw(f, &view))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = action_for(key, state.is_editing()) {
                tracing::debug!("Form action {:?} on {:?}", action, state.focus());
                state.apply(action, &use_case);
            }
        }

        if state.should_quit() {
            tracing::debug!("Closing screening form");
            return Ok(());
        }
    }
}

/// Key bindings. While a typed value is pending, Enter stores it
/// and Esc drops it.
fn action_for(key: KeyEvent, editing: bool) -> Option<FormAction> {
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => FormAction::Quit,
        KeyCode::Esc if editing => FormAction::Cancel,
        KeyCode::Char('q') | KeyCode::Esc => FormAction::Quit,

        KeyCode::Down | KeyCode::Tab => FormAction::FocusNext,
        KeyCode::Up | KeyCode::BackTab => FormAction::FocusPrev,

        KeyCode::Right | KeyCode::Char('+') => FormAction::Increase,
        KeyCode::Left | KeyCode::Char('-') => FormAction::Decrease,
        KeyCode::PageUp   => FormAction::IncreaseLarge,
        KeyCode::PageDown => FormAction::DecreaseLarge,
        KeyCode::Home     => FormAction::ToMin,
        KeyCode::End      => FormAction::ToMax,

        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => FormAction::Digit(c),
        KeyCode::Backspace => FormAction::Backspace,

        KeyCode::Char('r') => FormAction::Reset,
        KeyCode::Enter if editing => FormAction::Commit,
        KeyCode::Enter | KeyCode::Char('a') => FormAction::Analyze,
        _ => return None,
    };
    Some(action)
}

// ─── Drawing ──────────────────────────────────────────────────────────────────

fn draw(f: &mut Frame, view: &FormView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(f.size());

    let title = Paragraph::new(Line::from(Span::styled(
        view.title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(30)])
        .split(rows[1]);

    draw_sidebar(f, body[0], &view.controls);
    draw_main(f, body[1], view);

    let help = Paragraph::new(Line::from(Span::styled(
        "↑/↓ select  ←/→ adjust  0-9 type  PgUp/PgDn ±10  Home/End min/max  r reset  Enter analyze  q quit",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(help, rows[2]);
}

fn draw_sidebar(f: &mut Frame, area: Rect, controls: &[ControlView]) {
    // inner width minus the knob-value column
    let bar_width = usize::from(area.width.saturating_sub(2 + 9));

    let mut lines = Vec::with_capacity(controls.len() * 3);
    for c in controls {
        let (marker, label_style) = if c.focused {
            ("▶ ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default())
        };
        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(c.label, label_style),
            Span::styled(format!("  [{}]", c.range), Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                presenter::slider_bar(c.ratio, bar_width),
                if c.focused { label_style } else { Style::default().fg(Color::Gray) },
            ),
            Span::styled(
                format!(" {:>6}", c.value),
                if c.editing {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                },
            ),
        ]));
        lines.push(Line::raw(""));
    }

    let sidebar = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Student Profile"));
    f.render_widget(sidebar, area);
}

fn draw_main(f: &mut Frame, area: Rect, view: &FormView) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let metrics = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(parts[0]);
    f.render_widget(metric("Burnout Index", &view.burnout_index), metrics[0]);
    f.render_widget(metric("Total Stress", &view.total_stress), metrics[1]);

    let action = Paragraph::new(Line::from(vec![
        Span::styled("[ Enter ] ", Style::default().fg(Color::Cyan)),
        Span::styled("Analyze Risk", Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(action, parts[1]);

    let (text, style) = match &view.outcome {
        None => (
            "Adjust the profile, then press Enter to analyze.".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Some(Outcome::Verdict(v)) => {
            let color = if v.is_high_risk() { Color::Red } else { Color::Green };
            (v.message(), Style::default().fg(color).add_modifier(Modifier::BOLD))
        }
        Some(Outcome::Failed(msg)) => (
            format!("Analysis failed: {msg}"),
            Style::default().fg(Color::Red),
        ),
    };
    let results = Paragraph::new(Line::from(Span::styled(text, style)))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Assessment Results"));
    f.render_widget(results, parts[2]);
}

fn metric<'a>(title: &'a str, value: &'a str) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(title))
}
