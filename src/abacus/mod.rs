//! Bead-state model for a soroban-style abacus.
//!
//! One upper bead worth 5 and four lower beads worth 1 per column; a bead
//! counts toward the digit only while it sits at the reckoning bar.

pub mod column;
pub mod rack;

pub use column::{Column, LOWER_BEADS, UPPER_WEIGHT};
pub use rack::{Abacus, AbacusError, DEFAULT_COLUMNS, MAX_COLUMNS};
