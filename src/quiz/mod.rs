//! Question generation for drills and games.

pub mod generator;
pub mod question;

pub use generator::{QuestionGenerator, QuizError, MAX_OPERAND, MAX_SAMPLE_ATTEMPTS, OPTION_COUNT};
pub use question::{Op, Question};
