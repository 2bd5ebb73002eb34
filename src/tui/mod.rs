//! Terminal interface for the tutor.
//!
//! Provides the full screen flow of the app:
//! - Welcome and registration
//! - Home menu
//! - Guided lessons on an interactive rack
//! - Timed practice drills
//! - The multiple-choice game

mod app;
mod ui;

pub use app::{run_app, App, Screen, StartScreen};
