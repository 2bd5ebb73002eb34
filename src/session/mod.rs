//! Screen-level session state.
//!
//! Everything here is a pure state machine: the hosting UI owns the clock
//! and feeds whole seconds in through `tick_second`, so sessions never
//! block, sleep, or read time themselves.

pub mod game;
pub mod lesson;
pub mod practice;
pub mod profile;

pub use game::{AnswerOutcome, GameConfig, GamePhase, GameSession, PerformanceTier};
pub use lesson::{Lesson, LessonWalkthrough, LESSONS};
pub use practice::{Feedback, PracticeConfig, PracticeMode, PracticeSession, PracticeState};
pub use profile::Profile;

use crate::quiz::QuizError;
use thiserror::Error;

/// Errors from driving a session outside its active phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session is not accepting answers right now.
    #[error("session is not active")]
    NotActive,

    /// Question generation failed underneath the session.
    #[error("question generation failed: {0}")]
    Quiz(#[from] QuizError),
}
