//! The timed multiple-choice game.
//!
//! One round runs against a global countdown: answer as many questions as
//! possible before the clock runs out, with a growing bonus for answer
//! streaks.

use crate::quiz::{Question, QuestionGenerator, QuizError, OPTION_COUNT};
use crate::session::SessionError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Base points for a correct answer.
pub const POINTS_PER_QUESTION: u32 = 10;

/// Extra points per answer already in the streak.
pub const STREAK_BONUS: u32 = 2;

/// Round length and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Global countdown, in seconds.
    pub duration_secs: u32,
    /// The round ends early after this many questions.
    pub max_questions: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            max_questions: 20,
        }
    }
}

/// Where the round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// The start screen, before the countdown runs.
    Menu,
    /// Questions are being posed and the clock is running.
    Playing,
    /// Time ran out or the question limit was reached.
    Finished,
}

/// What one answer did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Points awarded, streak bonus included; 0 for a wrong answer.
    pub points: u32,
    /// The right answer, for feedback on a miss.
    pub answer: u8,
}

/// How the round went, relative to the maximum base score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceTier {
    Superstar,
    Excellent,
    Good,
    KeepPracticing,
}

impl PerformanceTier {
    /// Tier for a score expressed as a percentage of the maximum base
    /// score. Streak bonuses can push the percentage past 100.
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 90 {
            PerformanceTier::Superstar
        } else if percent >= 75 {
            PerformanceTier::Excellent
        } else if percent >= 50 {
            PerformanceTier::Good
        } else {
            PerformanceTier::KeepPracticing
        }
    }

    /// The end-screen message.
    pub const fn message(self) -> &'static str {
        match self {
            PerformanceTier::Superstar => "Superstar! You are a math champion!",
            PerformanceTier::Excellent => "Excellent! Keep it up!",
            PerformanceTier::Good => "Good! A little more practice!",
            PerformanceTier::KeepPracticing => "No worries! Keep practicing!",
        }
    }
}

/// One game round.
pub struct GameSession<R: Rng> {
    config: GameConfig,
    generator: QuestionGenerator<R>,
    phase: GamePhase,
    question: Question,
    options: [u8; OPTION_COUNT],
    score: u32,
    streak: u32,
    best_streak: u32,
    questions_answered: u32,
    time_left: u32,
}

impl<R: Rng> GameSession<R> {
    pub fn new(config: GameConfig, mut generator: QuestionGenerator<R>) -> Result<Self, QuizError> {
        let question = generator.next_question();
        let options = generator.options(question.answer())?;
        Ok(Self {
            config,
            generator,
            phase: GamePhase::Menu,
            question,
            options,
            score: 0,
            streak: 0,
            best_streak: 0,
            questions_answered: 0,
            time_left: config.duration_secs,
        })
    }

    /// Begin (or replay) the round: counters cleared, clock wound up, a
    /// fresh question on the board.
    pub fn start(&mut self) -> Result<(), QuizError> {
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.questions_answered = 0;
        self.time_left = self.config.duration_secs;
        self.next_round()?;
        self.phase = GamePhase::Playing;
        Ok(())
    }

    /// Answer the current question with one of the offered options.
    ///
    /// Scoring: a correct answer is worth `10 + 2 × streak` (the streak as
    /// it stood before this answer); a miss scores nothing and breaks the
    /// streak. The round advances to the next question, or finishes at the
    /// question limit.
    pub fn answer(&mut self, choice: u8) -> Result<AnswerOutcome, SessionError> {
        if self.phase != GamePhase::Playing {
            return Err(SessionError::NotActive);
        }

        let answer = self.question.answer();
        let correct = choice == answer;
        let points = if correct {
            POINTS_PER_QUESTION + STREAK_BONUS * self.streak
        } else {
            0
        };

        if correct {
            self.score += points;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }

        self.questions_answered += 1;
        if self.questions_answered >= self.config.max_questions {
            self.phase = GamePhase::Finished;
        } else {
            self.next_round()?;
        }

        Ok(AnswerOutcome {
            correct,
            points,
            answer,
        })
    }

    /// Back to the start screen with the scoreboard cleared.
    pub fn reset(&mut self) {
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.questions_answered = 0;
        self.time_left = self.config.duration_secs;
        self.phase = GamePhase::Menu;
    }

    /// Advance the global countdown by one second; at zero the round ends.
    /// Ignored outside the playing phase.
    pub fn tick_second(&mut self) -> GamePhase {
        if self.phase == GamePhase::Playing {
            self.time_left = self.time_left.saturating_sub(1);
            if self.time_left == 0 {
                self.phase = GamePhase::Finished;
            }
        }
        self.phase
    }

    /// Score as a percentage of the maximum base score, streak bonus
    /// included, so it can exceed 100.
    pub fn score_percent(&self) -> u32 {
        let max_base = self.config.max_questions * POINTS_PER_QUESTION;
        if max_base == 0 {
            return 0;
        }
        self.score * 100 / max_base
    }

    /// Tier for the end screen.
    pub fn performance(&self) -> PerformanceTier {
        PerformanceTier::from_percent(self.score_percent())
    }

    fn next_round(&mut self) -> Result<(), QuizError> {
        self.question = self.generator.next_question();
        self.options = self.generator.options(self.question.answer())?;
        Ok(())
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// The multiple-choice options for the current question.
    #[inline]
    pub fn options(&self) -> [u8; OPTION_COUNT] {
        self.options
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[inline]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// How many questions have been answered so far.
    #[inline]
    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    #[inline]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    #[inline]
    pub fn config(&self) -> GameConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuestionGenerator;

    fn session(config: GameConfig) -> GameSession<rand::rngs::StdRng> {
        GameSession::new(config, QuestionGenerator::seeded(5)).unwrap()
    }

    fn answer_correctly(game: &mut GameSession<rand::rngs::StdRng>) -> AnswerOutcome {
        let right = game.question().answer();
        game.answer(right).unwrap()
    }

    fn answer_wrongly(game: &mut GameSession<rand::rngs::StdRng>) -> AnswerOutcome {
        let right = game.question().answer();
        // Any option that is not the answer; options are distinct.
        let wrong = game
            .options()
            .into_iter()
            .find(|&o| o != right)
            .expect("options always include a distractor");
        game.answer(wrong).unwrap()
    }

    #[test]
    fn test_answers_rejected_outside_playing() {
        let mut game = session(GameConfig::default());
        assert_eq!(game.answer(1), Err(SessionError::NotActive));
    }

    #[test]
    fn test_streak_scoring() {
        let mut game = session(GameConfig::default());
        game.start().unwrap();

        // First correct: 10. Second: 10 + 2. Third: 10 + 4.
        assert_eq!(answer_correctly(&mut game).points, 10);
        assert_eq!(answer_correctly(&mut game).points, 12);
        assert_eq!(answer_correctly(&mut game).points, 14);
        assert_eq!(game.score(), 36);
        assert_eq!(game.streak(), 3);
    }

    #[test]
    fn test_miss_breaks_the_streak_but_not_the_best() {
        let mut game = session(GameConfig::default());
        game.start().unwrap();

        answer_correctly(&mut game);
        answer_correctly(&mut game);
        let outcome = answer_wrongly(&mut game);

        assert!(!outcome.correct);
        assert_eq!(outcome.points, 0);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.best_streak(), 2);
    }

    #[test]
    fn test_question_limit_finishes_the_round() {
        let mut game = session(GameConfig {
            duration_secs: 60,
            max_questions: 3,
        });
        game.start().unwrap();

        answer_correctly(&mut game);
        answer_correctly(&mut game);
        assert_eq!(game.phase(), GamePhase::Playing);
        answer_correctly(&mut game);
        assert_eq!(game.phase(), GamePhase::Finished);
        assert_eq!(game.answer(0), Err(SessionError::NotActive));
    }

    #[test]
    fn test_clock_finishes_the_round() {
        let mut game = session(GameConfig {
            duration_secs: 2,
            max_questions: 20,
        });
        game.start().unwrap();

        assert_eq!(game.tick_second(), GamePhase::Playing);
        assert_eq!(game.tick_second(), GamePhase::Finished);
        // Further ticks stay finished without underflowing.
        assert_eq!(game.tick_second(), GamePhase::Finished);
    }

    #[test]
    fn test_options_always_include_the_answer() {
        let mut game = session(GameConfig::default());
        game.start().unwrap();

        for _ in 0..10 {
            let answer = game.question().answer();
            assert!(game.options().contains(&answer));
            answer_correctly(&mut game);
        }
    }

    #[test]
    fn test_replay_clears_the_scoreboard() {
        let mut game = session(GameConfig {
            duration_secs: 60,
            max_questions: 2,
        });
        game.start().unwrap();
        answer_correctly(&mut game);
        answer_correctly(&mut game);
        assert_eq!(game.phase(), GamePhase::Finished);

        game.start().unwrap();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.best_streak(), 0);
        assert_eq!(game.questions_answered(), 0);
    }

    #[test]
    fn test_reset_returns_to_menu() {
        let mut game = session(GameConfig::default());
        game.start().unwrap();
        answer_correctly(&mut game);
        game.reset();

        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(game.score(), 0);
        assert_eq!(game.time_left(), GameConfig::default().duration_secs);
    }

    #[test]
    fn test_performance_tiers() {
        assert_eq!(
            PerformanceTier::from_percent(95),
            PerformanceTier::Superstar
        );
        assert_eq!(
            PerformanceTier::from_percent(90),
            PerformanceTier::Superstar
        );
        assert_eq!(PerformanceTier::from_percent(80), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percent(50), PerformanceTier::Good);
        assert_eq!(
            PerformanceTier::from_percent(10),
            PerformanceTier::KeepPracticing
        );
    }
}
