//! Timed practice drills.
//!
//! A practice run poses a fixed number of problems, each on its own
//! countdown. The drill works the same in every mode; the mode only decides
//! how the learner is told to find the answer (and, for abacus mode, that
//! the rack's value is what gets checked).

use crate::quiz::{Question, QuestionGenerator};
use crate::session::SessionError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the learner is asked to work out each answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PracticeMode {
    /// Count on fingers, type the answer.
    Fingers,
    /// Solve on the abacus; the rack's value is the answer.
    Abacus,
    /// Solve mentally, type the answer.
    Imagination,
}

impl PracticeMode {
    /// All modes in menu order.
    pub const ALL: [PracticeMode; 3] = [
        PracticeMode::Fingers,
        PracticeMode::Abacus,
        PracticeMode::Imagination,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            PracticeMode::Fingers => "Fingers Mode",
            PracticeMode::Abacus => "Abacus Mode",
            PracticeMode::Imagination => "Imagination Mode",
        }
    }

    pub const fn instruction(self) -> &'static str {
        match self {
            PracticeMode::Fingers => "Count on your fingers and type the answer",
            PracticeMode::Abacus => "Arrange the beads until the rack shows the answer",
            PracticeMode::Imagination => "Work it out in your head and type the answer",
        }
    }
}

/// Drill length and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeConfig {
    /// Problems per run.
    pub problems: u32,
    /// Countdown per problem, in seconds.
    pub seconds_per_problem: u32,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            problems: 50,
            seconds_per_problem: 30,
        }
    }
}

/// What the learner is told after a problem closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Correct,
    Incorrect { correct: u8 },
    TimedOut { correct: u8 },
}

/// Where the drill stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PracticeState {
    /// Waiting for the learner to start.
    Idle,
    /// A problem is open and its countdown is running.
    Active,
    /// The last problem closed; feedback is showing.
    Feedback(Feedback),
    /// Every problem has been posed.
    Complete,
}

/// One practice run.
pub struct PracticeSession<R: Rng> {
    mode: PracticeMode,
    config: PracticeConfig,
    generator: QuestionGenerator<R>,
    question: Question,
    /// Zero-based index of the open problem.
    problem: u32,
    score: u32,
    time_left: u32,
    state: PracticeState,
}

impl<R: Rng> PracticeSession<R> {
    pub fn new(mode: PracticeMode, config: PracticeConfig, mut generator: QuestionGenerator<R>) -> Self {
        let question = generator.next_question();
        Self {
            mode,
            config,
            generator,
            question,
            problem: 0,
            score: 0,
            time_left: config.seconds_per_problem,
            state: PracticeState::Idle,
        }
    }

    /// Begin (or restart) the run with a fresh first problem.
    pub fn start(&mut self) {
        self.problem = 0;
        self.score = 0;
        self.time_left = self.config.seconds_per_problem;
        self.question = self.generator.next_question();
        self.state = PracticeState::Active;
    }

    /// Close the open problem with the learner's answer.
    ///
    /// For abacus mode pass the rack's `value()`; for the typing modes pass
    /// the parsed input. A correct answer scores one point.
    pub fn check_answer(&mut self, given: u64) -> Result<Feedback, SessionError> {
        if self.state != PracticeState::Active {
            return Err(SessionError::NotActive);
        }

        let correct = self.question.answer();
        let feedback = if given == correct as u64 {
            self.score += 1;
            Feedback::Correct
        } else {
            Feedback::Incorrect { correct }
        };
        self.state = PracticeState::Feedback(feedback);
        Ok(feedback)
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the time-out feedback if this tick closed the problem;
    /// ignored outside the active state so the caller's clock can keep
    /// running while feedback is on screen.
    pub fn tick_second(&mut self) -> Option<Feedback> {
        if self.state != PracticeState::Active {
            return None;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return None;
        }

        let feedback = Feedback::TimedOut {
            correct: self.question.answer(),
        };
        self.state = PracticeState::Feedback(feedback);
        Some(feedback)
    }

    /// Move past the feedback to the next problem, or finish the run.
    pub fn next_problem(&mut self) {
        if !matches!(self.state, PracticeState::Feedback(_)) {
            return;
        }

        self.problem += 1;
        if self.problem >= self.config.problems {
            self.state = PracticeState::Complete;
            return;
        }

        self.question = self.generator.next_question();
        self.time_left = self.config.seconds_per_problem;
        self.state = PracticeState::Active;
    }

    /// Abandon the run and return to the idle state.
    pub fn reset(&mut self) {
        self.problem = 0;
        self.score = 0;
        self.time_left = self.config.seconds_per_problem;
        self.question = self.generator.next_question();
        self.state = PracticeState::Idle;
    }

    #[inline]
    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    #[inline]
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// One-based problem number for display.
    #[inline]
    pub fn problem_number(&self) -> u32 {
        self.problem + 1
    }

    #[inline]
    pub fn total_problems(&self) -> u32 {
        self.config.problems
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    #[inline]
    pub fn state(&self) -> PracticeState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == PracticeState::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuestionGenerator;

    fn short_session(problems: u32) -> PracticeSession<rand::rngs::StdRng> {
        PracticeSession::new(
            PracticeMode::Imagination,
            PracticeConfig {
                problems,
                seconds_per_problem: 3,
            },
            QuestionGenerator::seeded(11),
        )
    }

    #[test]
    fn test_answers_before_start_are_rejected() {
        let mut session = short_session(2);
        assert_eq!(session.check_answer(1), Err(SessionError::NotActive));
    }

    #[test]
    fn test_correct_answer_scores_a_point() {
        let mut session = short_session(2);
        session.start();

        let answer = session.question().answer() as u64;
        assert_eq!(session.check_answer(answer), Ok(Feedback::Correct));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_wrong_answer_reports_the_correct_one() {
        let mut session = short_session(2);
        session.start();

        let correct = session.question().answer();
        let feedback = session.check_answer(correct as u64 + 1).unwrap();
        assert_eq!(feedback, Feedback::Incorrect { correct });
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_countdown_times_out() {
        let mut session = short_session(2);
        session.start();

        assert_eq!(session.tick_second(), None);
        assert_eq!(session.tick_second(), None);
        match session.tick_second() {
            Some(Feedback::TimedOut { .. }) => {}
            other => panic!("expected time-out, got {:?}", other),
        }
        // The closed problem no longer accepts answers.
        assert_eq!(session.check_answer(0), Err(SessionError::NotActive));
    }

    #[test]
    fn test_ticks_pause_during_feedback() {
        let mut session = short_session(2);
        session.start();
        session.check_answer(0).unwrap();

        let before = session.time_left();
        assert_eq!(session.tick_second(), None);
        assert_eq!(session.time_left(), before);
    }

    #[test]
    fn test_run_completes_after_last_problem() {
        let mut session = short_session(2);
        session.start();

        for _ in 0..2 {
            let answer = session.question().answer() as u64;
            session.check_answer(answer).unwrap();
            session.next_problem();
        }

        assert!(session.is_complete());
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_next_problem_resets_countdown() {
        let mut session = short_session(3);
        session.start();
        session.tick_second();
        session.check_answer(0).unwrap();
        session.next_problem();

        assert_eq!(session.time_left(), 3);
        assert_eq!(session.problem_number(), 2);
        assert_eq!(session.state(), PracticeState::Active);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = short_session(2);
        session.start();
        session.check_answer(0).unwrap();
        session.reset();

        assert_eq!(session.state(), PracticeState::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.problem_number(), 1);
    }
}
