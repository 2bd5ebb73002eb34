//! # Abacus Tutor
//!
//! An interactive soroban-style abacus tutor for learning arithmetic.
//!
//! The abacus carries one five-bead and four one-beads per column; a bead
//! counts toward the value only while it sits at the reckoning bar. Around
//! that core sit a question generator for drills and games, and the
//! screen-level sessions that drive the terminal interface.

pub mod abacus;
pub mod quiz;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use abacus::{Abacus, AbacusError, Column, DEFAULT_COLUMNS, LOWER_BEADS};
pub use quiz::{Op, Question, QuestionGenerator, QuizError, OPTION_COUNT};
pub use session::{
    GameConfig, GamePhase, GameSession, LessonWalkthrough, PracticeConfig, PracticeMode,
    PracticeSession, Profile, SessionError,
};

#[cfg(feature = "tui")]
pub use tui::{run_app, StartScreen};
