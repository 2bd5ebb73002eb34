//! Application state and event loop for the terminal tutor.

use crate::abacus::Abacus;
use crate::quiz::{QuestionGenerator, QuizError};
use crate::session::{
    Feedback, GameConfig, GamePhase, GameSession, LessonWalkthrough, PracticeConfig, PracticeMode,
    PracticeSession, PracticeState, Profile,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;

/// Columns on the interactive rack used by the lesson and practice screens.
const RACK_COLUMNS: usize = 2;

/// Which screen is showing. Mirrors the app's navigation: Welcome leads to
/// Registration, Registration to Home, and Home fans out to the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Registration,
    Home,
    Learn,
    Practice,
    Game,
}

/// Where to drop the user on launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartScreen {
    Welcome,
    Learn,
    Practice,
    Game,
}

/// The registration form: three text fields and a focus cursor.
pub struct RegistrationForm {
    pub fields: [String; 3],
    pub focus: usize,
}

impl RegistrationForm {
    pub const LABELS: [&'static str; 3] = ["Name", "Birth date", "Standard"];

    pub fn new() -> Self {
        Self {
            fields: [String::new(), String::new(), String::new()],
            focus: 0,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn push(&mut self, c: char) {
        self.fields[self.focus].push(c);
    }

    pub fn pop(&mut self) {
        self.fields[self.focus].pop();
    }

    pub fn profile(&self) -> Profile {
        Profile::new(
            self.fields[0].clone(),
            self.fields[1].clone(),
            self.fields[2].clone(),
        )
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

/// The home menu, in display order. The last two match the app's placeholder
/// screens and just report that they are on the way.
pub const HOME_ITEMS: [(&str, &str); 5] = [
    ("Learn the abacus", "pick up new concepts"),
    ("Practice", "get sharper"),
    ("Fun game", "learn by playing"),
    ("Progress report", "see your scores"),
    ("Settings", "tune the app"),
];

/// Tutor application state.
pub struct App {
    pub screen: Screen,
    pub profile: Profile,
    pub form: RegistrationForm,
    pub home_cursor: usize,
    /// The interactive rack shared by the lesson and practice screens.
    pub abacus: Abacus,
    /// Selected column on the rack.
    pub selected_column: usize,
    pub lesson: LessonWalkthrough,
    pub practice: PracticeSession<StdRng>,
    pub game: GameSession<StdRng>,
    practice_config: PracticeConfig,
    /// Typed answer for the non-abacus practice modes.
    pub answer_input: String,
    /// Status message to display.
    pub status: String,
    /// Should we quit?
    pub should_quit: bool,
}

impl App {
    pub fn new(
        start: StartScreen,
        mode: PracticeMode,
        practice_config: PracticeConfig,
        game_config: GameConfig,
    ) -> Result<Self, QuizError> {
        let screen = match start {
            StartScreen::Welcome => Screen::Welcome,
            StartScreen::Learn => Screen::Learn,
            StartScreen::Practice => Screen::Practice,
            StartScreen::Game => Screen::Game,
        };
        // Jumping straight to a screen skips registration.
        let profile = match start {
            StartScreen::Welcome => Profile::default(),
            _ => Profile::demo(),
        };

        let mut app = Self {
            screen,
            profile,
            form: RegistrationForm::new(),
            home_cursor: 0,
            abacus: Abacus::new(RACK_COLUMNS),
            selected_column: 0,
            lesson: LessonWalkthrough::new(),
            practice: PracticeSession::new(
                mode,
                practice_config,
                QuestionGenerator::from_entropy(),
            ),
            game: GameSession::new(game_config, QuestionGenerator::from_entropy())?,
            practice_config,
            answer_input: String::new(),
            status: String::new(),
            should_quit: false,
        };
        app.set_screen(screen);
        Ok(app)
    }

    /// Navigate, resetting whatever the target screen needs fresh.
    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.abacus.reset();
        self.selected_column = 0;
        self.answer_input.clear();
        self.status = match screen {
            Screen::Welcome => "Press Enter to get started.".into(),
            Screen::Registration => {
                "Type to fill the fields; Tab switches, Enter registers, Ctrl-D tries the demo."
                    .into()
            }
            Screen::Home => format!("Welcome, {}! Pick an activity.", self.display_name()),
            Screen::Learn => "n: next lesson  b: back  Space/1-4: beads  Esc: home".into(),
            Screen::Practice => "f/a/i picks a mode, s starts.".into(),
            Screen::Game => "Press s to start the round.".into(),
        };
    }

    fn display_name(&self) -> &str {
        if self.profile.name.trim().is_empty() {
            "friend"
        } else {
            self.profile.name.trim()
        }
    }

    /// Dispatch a key press to the current screen.
    pub fn on_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Welcome => self.on_key_welcome(key),
            Screen::Registration => self.on_key_registration(key),
            Screen::Home => self.on_key_home(key),
            Screen::Learn => self.on_key_learn(key),
            Screen::Practice => self.on_key_practice(key),
            Screen::Game => self.on_key_game(key),
        }
    }

    /// Advance every running countdown by one second.
    pub fn tick_second(&mut self) {
        match self.screen {
            Screen::Practice => {
                if let Some(Feedback::TimedOut { correct }) = self.practice.tick_second() {
                    self.status = format!("Time's up! The answer was {}. Enter: next.", correct);
                }
            }
            Screen::Game => {
                if self.game.tick_second() == GamePhase::Finished && self.game.time_left() == 0 {
                    self.status = "Time! Let's see how you did.".into();
                }
            }
            _ => {}
        }
    }

    fn on_key_welcome(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.set_screen(Screen::Registration),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn on_key_registration(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('d') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.profile = Profile::demo();
            self.set_screen(Screen::Home);
            return;
        }
        match key.code {
            KeyCode::Esc => self.set_screen(Screen::Welcome),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Backspace => self.form.pop(),
            KeyCode::Enter => {
                let profile = self.form.profile();
                if profile.is_complete() {
                    self.profile = profile;
                    self.set_screen(Screen::Home);
                } else {
                    self.status = "Please fill in every field (or Ctrl-D for the demo).".into();
                }
            }
            KeyCode::Char(c) => self.form.push(c),
            _ => {}
        }
    }

    fn on_key_home(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => {
                self.home_cursor = self.home_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.home_cursor + 1 < HOME_ITEMS.len() {
                    self.home_cursor += 1;
                }
            }
            KeyCode::Enter => match self.home_cursor {
                0 => {
                    self.lesson = LessonWalkthrough::new();
                    self.set_screen(Screen::Learn);
                }
                1 => {
                    self.practice.reset();
                    self.set_screen(Screen::Practice);
                }
                2 => {
                    self.game.reset();
                    self.set_screen(Screen::Game);
                }
                _ => {
                    self.status = "Coming soon! This part is still being built.".into();
                }
            },
            _ => {}
        }
    }

    fn on_key_learn(&mut self, key: KeyEvent) {
        if self.rack_key(key.code) {
            return;
        }
        match key.code {
            KeyCode::Esc => self.set_screen(Screen::Home),
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('n') => {
                if self.lesson.next() {
                    self.abacus.reset();
                    self.status.clear();
                } else {
                    self.status = "That was the last lesson. Time to practice!".into();
                }
            }
            KeyCode::Char('b') => {
                if self.lesson.prev() {
                    self.abacus.reset();
                    self.status.clear();
                }
            }
            _ => {}
        }
    }

    fn on_key_practice(&mut self, key: KeyEvent) {
        match self.practice.state() {
            PracticeState::Idle => match key.code {
                KeyCode::Esc => self.set_screen(Screen::Home),
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('f') => self.switch_practice_mode(PracticeMode::Fingers),
                KeyCode::Char('a') => self.switch_practice_mode(PracticeMode::Abacus),
                KeyCode::Char('i') => self.switch_practice_mode(PracticeMode::Imagination),
                KeyCode::Char('s') => {
                    self.practice.start();
                    self.abacus.reset();
                    self.answer_input.clear();
                    self.status = self.practice.mode().instruction().into();
                }
                _ => {}
            },
            PracticeState::Active => {
                if self.practice.mode() == PracticeMode::Abacus {
                    if self.rack_key(key.code) {
                        return;
                    }
                    match key.code {
                        KeyCode::Esc => self.set_screen(Screen::Home),
                        KeyCode::Enter => self.submit_practice_answer(self.abacus.value()),
                        _ => {}
                    }
                } else {
                    match key.code {
                        KeyCode::Esc => self.set_screen(Screen::Home),
                        KeyCode::Char(c) if c.is_ascii_digit() => {
                            // Answers never need more than three digits.
                            if self.answer_input.len() < 3 {
                                self.answer_input.push(c);
                            }
                        }
                        KeyCode::Backspace => {
                            self.answer_input.pop();
                        }
                        KeyCode::Enter => {
                            if let Ok(given) = self.answer_input.parse::<u64>() {
                                self.submit_practice_answer(given);
                            }
                        }
                        _ => {}
                    }
                }
            }
            PracticeState::Feedback(_) => match key.code {
                KeyCode::Esc => self.set_screen(Screen::Home),
                KeyCode::Enter | KeyCode::Char('n') => {
                    self.practice.next_problem();
                    self.abacus.reset();
                    self.answer_input.clear();
                    if self.practice.is_complete() {
                        self.status = format!(
                            "Complete! Score: {}/{}",
                            self.practice.score(),
                            self.practice.total_problems()
                        );
                    } else {
                        self.status.clear();
                    }
                }
                _ => {}
            },
            PracticeState::Complete => match key.code {
                KeyCode::Esc => self.set_screen(Screen::Home),
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('r') => {
                    self.practice.reset();
                    self.set_screen(Screen::Practice);
                }
                _ => {}
            },
        }
    }

    fn on_key_game(&mut self, key: KeyEvent) {
        match self.game.phase() {
            GamePhase::Menu => match key.code {
                KeyCode::Esc => self.set_screen(Screen::Home),
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('s') => self.start_game(),
                _ => {}
            },
            GamePhase::Playing => match key.code {
                KeyCode::Esc => self.set_screen(Screen::Home),
                KeyCode::Char(c @ '1'..='4') => {
                    let index = c as usize - '1' as usize;
                    let choice = self.game.options()[index];
                    match self.game.answer(choice) {
                        Ok(outcome) if outcome.correct => {
                            self.status = format!("+{} points!", outcome.points);
                        }
                        Ok(outcome) => {
                            self.status = format!("Oops, it was {}.", outcome.answer);
                        }
                        Err(e) => self.status = format!("Error: {}", e),
                    }
                }
                _ => {}
            },
            GamePhase::Finished => match key.code {
                KeyCode::Esc => self.set_screen(Screen::Home),
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('r') => self.start_game(),
                _ => {}
            },
        }
    }

    /// Bead and column keys shared by the lesson and abacus-practice
    /// screens. Returns true when the key was consumed.
    fn rack_key(&mut self, code: KeyCode) -> bool {
        match code {
            // Column 0 is the least significant digit, drawn rightmost.
            KeyCode::Left => {
                if self.selected_column + 1 < self.abacus.len() {
                    self.selected_column += 1;
                }
                true
            }
            KeyCode::Right => {
                self.selected_column = self.selected_column.saturating_sub(1);
                true
            }
            KeyCode::Char(' ') => {
                if let Err(e) = self.abacus.toggle_upper(self.selected_column) {
                    self.status = format!("Error: {}", e);
                }
                true
            }
            KeyCode::Char(c @ '1'..='4') => {
                let bead = c as usize - '1' as usize;
                if let Err(e) = self.abacus.toggle_lower(self.selected_column, bead) {
                    self.status = format!("Error: {}", e);
                }
                true
            }
            KeyCode::Char('x') => {
                self.abacus.reset();
                true
            }
            _ => false,
        }
    }

    fn submit_practice_answer(&mut self, given: u64) {
        match self.practice.check_answer(given) {
            Ok(Feedback::Correct) => {
                self.status = "Correct! Well done! Enter: next.".into();
            }
            Ok(Feedback::Incorrect { correct }) => {
                self.status = format!("Not quite - the answer is {}. Enter: next.", correct);
            }
            Ok(Feedback::TimedOut { .. }) => {}
            Err(e) => self.status = format!("Error: {}", e),
        }
    }

    fn switch_practice_mode(&mut self, mode: PracticeMode) {
        self.practice = PracticeSession::new(
            mode,
            self.practice_config,
            QuestionGenerator::from_entropy(),
        );
        self.status = format!("{}: {}", mode.title(), mode.instruction());
    }

    fn start_game(&mut self) {
        match self.game.start() {
            Ok(()) => self.status = "Go! Answer with keys 1-4.".into(),
            Err(e) => self.status = format!("Error: {}", e),
        }
    }
}

/// Run the terminal tutor, starting on `start`.
pub fn run_app(
    start: StartScreen,
    mode: PracticeMode,
    practice_config: PracticeConfig,
    game_config: GameConfig,
) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::{Duration, Instant};

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create app
    let mut app =
        App::new(start, mode, practice_config, game_config).map_err(std::io::Error::other)?;
    let mut last_tick = Instant::now();

    // Main loop
    loop {
        // Draw
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        // Whole-second ticks for the session countdowns
        while last_tick.elapsed() >= Duration::from_secs(1) {
            app.tick_second();
            last_tick += Duration::from_secs(1);
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
