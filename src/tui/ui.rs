//! Screen rendering for the tutor.

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

use super::app::{App, RegistrationForm, Screen, HOME_ITEMS};
use crate::abacus::{Abacus, LOWER_BEADS};
use crate::session::{GamePhase, PracticeMode, PracticeState};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Welcome => draw_welcome(frame, app),
        Screen::Registration => draw_registration(frame, app),
        Screen::Home => draw_home(frame, app),
        Screen::Learn => draw_learn(frame, app),
        Screen::Practice => draw_practice(frame, app),
        Screen::Game => draw_game(frame, app),
    }
}

fn draw_welcome(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let banner = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "🧮  A B A C U S   T U T O R  🧮",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Learn arithmetic the fun way, one bead at a time."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to get started",
            Style::default().fg(Color::Green),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(banner, chunks[0]);
    draw_status(frame, chunks[1], app);
}

fn draw_registration(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new("Tell us about yourself")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(title, chunks[0]);

    for (i, label) in RegistrationForm::LABELS.iter().enumerate() {
        let focused = app.form.focus == i;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value = if focused {
            format!("{}█", app.form.fields[i])
        } else {
            app.form.fields[i].clone()
        };
        let field = Paragraph::new(value)
            .block(Block::default()
                .title(format!(" {} ", label))
                .borders(Borders::ALL)
                .border_style(style));
        frame.render_widget(field, chunks[i + 1]);
    }

    draw_status(frame, chunks[5], app);
}

fn draw_home(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let greeting = Paragraph::new(format!("Hello, {}! 👋", app.profile.name))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(greeting, chunks[0]);

    let items: Vec<ListItem> = HOME_ITEMS
        .iter()
        .enumerate()
        .map(|(i, (title, subtitle))| {
            let prefix = if i == app.home_cursor { "▶ " } else { "  " };
            let style = if i == app.home_cursor {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}{} - {}", prefix, title, subtitle)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default()
        .title(" What shall we do today? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan)));
    frame.render_widget(list, chunks[1]);

    draw_status(frame, chunks[2], app);
    draw_help(frame, chunks[3], "↑↓: Choose  Enter: Open  q: Quit");
}

fn draw_learn(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let lesson = app.lesson.current();

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .percent(app.lesson.progress_percent())
        .label(format!(
            "Lesson {} of {}",
            app.lesson.step() + 1,
            app.lesson.total()
        ));
    frame.render_widget(progress, chunks[0]);

    let card = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}  {}", lesson.emblem, lesson.title),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            lesson.description,
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(format!("💡 {}", lesson.content)),
    ])
    .wrap(ratatui::widgets::Wrap { trim: true })
    .block(Block::default()
        .title(" Lesson ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan)));
    frame.render_widget(card, chunks[1]);

    draw_abacus(frame, chunks[2], &app.abacus, app.selected_column);

    let target_line = match lesson.target {
        Some(target) if app.lesson.target_met(app.abacus.value()) => Line::from(Span::styled(
            format!("🎯 Target: {}   ✅ Perfect!", target),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Some(target) => Line::from(format!(
            "🎯 Target: {}   Current: {}",
            target,
            app.abacus.value()
        )),
        None => Line::from("Look around and try the beads - nothing to build yet."),
    };
    let target = Paragraph::new(target_line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(target, chunks[3]);

    draw_status(frame, chunks[4], app);
}

fn draw_practice(frame: &mut Frame, app: &App) {
    match app.practice.state() {
        PracticeState::Idle => draw_practice_menu(frame, app),
        PracticeState::Complete => draw_practice_summary(frame, app),
        _ => draw_practice_problem(frame, app),
    }
}

fn draw_practice_menu(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let mut lines = vec![
        Line::from(Span::styled(
            "✏️  Practice time!",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for mode in PracticeMode::ALL {
        let marker = if mode == app.practice.mode() { "▶" } else { " " };
        let key = match mode {
            PracticeMode::Fingers => 'f',
            PracticeMode::Abacus => 'a',
            PracticeMode::Imagination => 'i',
        };
        let style = if mode == app.practice.mode() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{} [{}] {} - {} ({} problems)",
                marker,
                key,
                mode.title(),
                mode.instruction(),
                app.practice.total_problems()
            ),
            style,
        )));
    }

    let menu = Paragraph::new(lines).block(Block::default()
        .title(" Pick a mode ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan)));
    frame.render_widget(menu, chunks[0]);

    draw_status(frame, chunks[1], app);
    draw_help(frame, chunks[2], "f/a/i: Mode  s: Start  Esc: Home  q: Quit");
}

fn draw_practice_problem(frame: &mut Frame, app: &App) {
    let abacus_mode = app.practice.mode() == PracticeMode::Abacus;
    let input_height = if abacus_mode { 12 } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(input_height),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(vec![
        Span::raw(format!(
            "Problem {} / {}",
            app.practice.problem_number(),
            app.practice.total_problems()
        )),
        Span::raw("   "),
        Span::styled(
            format!("⏱ {}s", app.practice.time_left()),
            timer_style(app.practice.time_left()),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Score: {}", app.practice.score()),
            Style::default().fg(Color::Cyan),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let question = Paragraph::new(Span::styled(
        format!("{} = ?", app.practice.question()),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(question, chunks[1]);

    if abacus_mode {
        draw_abacus(frame, chunks[2], &app.abacus, app.selected_column);
    } else {
        let answer = Paragraph::new(format!("{}█", app.answer_input))
            .alignment(Alignment::Center)
            .block(Block::default()
                .title(" Your answer ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)));
        frame.render_widget(answer, chunks[2]);
    }

    draw_status(frame, chunks[4], app);
}

fn draw_practice_summary(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let card = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "🏆 Practice complete!",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Score: {} / {}",
            app.practice.score(),
            app.practice.total_problems()
        )),
        Line::from(""),
        Line::from(Span::styled(
            "r: Practice again   Esc: Home",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green)));
    frame.render_widget(card, chunks[0]);

    draw_status(frame, chunks[1], app);
}

fn draw_game(frame: &mut Frame, app: &App) {
    match app.game.phase() {
        GamePhase::Menu => draw_game_menu(frame, app),
        GamePhase::Playing => draw_game_round(frame, app),
        GamePhase::Finished => draw_game_summary(frame, app),
    }
}

fn draw_game_menu(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let config = app.game.config();
    let card = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "🎯 Math Balloon Pop!",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Solve as many as you can in {} seconds!",
            config.duration_secs
        )),
        Line::from(""),
        Line::from("• A right answer earns 10 points"),
        Line::from("• Streak bonus: keep answering right for extra points!"),
        Line::from(format!("• At most {} questions per round", config.max_questions)),
        Line::from(""),
        Line::from(Span::styled(
            "🚀 Press s to start!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default()
        .title(" How to play ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan)));
    frame.render_widget(card, chunks[0]);

    draw_status(frame, chunks[1], app);
}

fn draw_game_round(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let config = app.game.config();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Score: {}", app.game.score()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("⏱ {}s", app.game.time_left()),
            timer_style(app.game.time_left()),
        ),
        Span::raw("   "),
        Span::raw(format!(
            "Question {}/{}",
            app.game.questions_answered() + 1,
            config.max_questions
        )),
        Span::raw("   "),
        Span::styled(
            format!("🔥 {}", app.game.streak()),
            Style::default().fg(Color::Red),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let question = Paragraph::new(Span::styled(
        format!("{} = ?", app.game.question()),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(question, chunks[1]);

    let items: Vec<ListItem> = app
        .game
        .options()
        .into_iter()
        .enumerate()
        .map(|(i, option)| {
            ListItem::new(format!("  {}) {}", i + 1, option))
                .style(Style::default().fg(Color::White))
        })
        .collect();
    let list = List::new(items).block(Block::default()
        .title(" Pick with keys 1-4 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta)));
    frame.render_widget(list, chunks[2]);

    draw_status(frame, chunks[3], app);
}

fn draw_game_summary(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(11),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let card = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "🎉 Game Over!",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Final score: {}", app.game.score()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Questions answered: {}", app.game.questions_answered())),
        Line::from(format!("Best streak: 🔥 {}", app.game.best_streak())),
        Line::from(""),
        Line::from(Span::styled(
            app.game.performance().message(),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "r: Play again   Esc: Home",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green)));
    frame.render_widget(card, chunks[0]);

    draw_status(frame, chunks[1], app);
}

/// Render the rack: five-beads above the reckoning bar, one-beads below,
/// the selected column highlighted. Beads sit against the bar when active
/// and rest away from it when not.
fn draw_abacus(frame: &mut Frame, area: Rect, abacus: &Abacus, selected: usize) {
    const CELL: usize = 5;

    let mut lines: Vec<Line> = Vec::new();

    // Place-value labels, most significant column on the left.
    let mut spans = Vec::new();
    for i in (0..abacus.len()).rev() {
        let style = if i == selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{:^CELL$}", place_label(i)), style));
    }
    lines.push(Line::from(spans));

    // Two rows above the bar: the five-bead rests in the top row and sits
    // in the bottom row when counted.
    for row in 0..2 {
        let mut spans = Vec::new();
        for i in (0..abacus.len()).rev() {
            let column = &abacus.columns()[i];
            let at_bar = column.upper();
            let bead_here = (row == 1) == at_bar;
            let (cell, style) = if bead_here {
                (format!("{:^CELL$}", "●"), upper_bead_style(at_bar))
            } else {
                (" ".repeat(CELL), Style::default())
            };
            spans.push(Span::styled(cell, style));
        }
        lines.push(Line::from(spans));
    }

    // The reckoning bar.
    let mut spans = Vec::new();
    for _ in 0..abacus.len() {
        spans.push(Span::styled(
            "━".repeat(CELL),
            Style::default().fg(Color::White),
        ));
    }
    lines.push(Line::from(spans));

    // Five rows below the bar: the four one-beads stack against the bar
    // when counted, leaving the gap after the active run.
    for row in 0..=LOWER_BEADS {
        let mut spans = Vec::new();
        for i in (0..abacus.len()).rev() {
            let column = &abacus.columns()[i];
            let count = column.lower_count() as usize;
            let (bead_here, active) = if row < count {
                (true, true)
            } else {
                (row > count && row <= LOWER_BEADS, false)
            };
            let (cell, style) = if bead_here {
                (format!("{:^CELL$}", "●"), lower_bead_style(active))
            } else {
                (" ".repeat(CELL), Style::default())
            };
            spans.push(Span::styled(cell, style));
        }
        lines.push(Line::from(spans));
    }

    // Digit readout per column.
    let mut spans = Vec::new();
    for i in (0..abacus.len()).rev() {
        let style = if i == selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("{:^CELL$}", abacus.columns()[i].digit()),
            style,
        ));
    }
    lines.push(Line::from(spans));

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default()
            .title(format!(" 🧮 Abacus - Total: {} ", abacus.value()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));
    frame.render_widget(widget, area);
}

/// Label for a column's place value: 1, 10, 100, then 1k, 10k, ...
fn place_label(index: usize) -> String {
    let value = 10u64.pow(index as u32);
    if value >= 1000 {
        format!("{}k", value / 1000)
    } else {
        value.to_string()
    }
}

fn upper_bead_style(active: bool) -> Style {
    // Five-beads are red, like the app's.
    if active {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::DIM)
    }
}

fn lower_bead_style(active: bool) -> Style {
    // One-beads are blue.
    if active {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue).add_modifier(Modifier::DIM)
    }
}

fn timer_style(seconds: u32) -> Style {
    if seconds <= 5 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    }
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default()
            .title(" Help ")
            .borders(Borders::ALL));

    frame.render_widget(help, area);
}
