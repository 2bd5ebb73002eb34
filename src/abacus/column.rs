//! Single abacus column (one decimal digit place).
//!
//! A column carries one upper "heaven" bead worth 5 and four lower "earth"
//! beads worth 1 each. A bead counts toward the digit only while it sits at
//! the reckoning bar. Lower beads slide as a contiguous stack, so the active
//! lower beads always form a prefix of the rod: we store the prefix length
//! and derive per-bead state from it, which makes the stack invariant
//! impossible to violate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of lower ("one") beads on each column.
pub const LOWER_BEADS: usize = 4;

/// Value contributed by the upper bead when it is at the bar.
pub const UPPER_WEIGHT: u8 = 5;

/// One rod of the abacus, holding a digit in 0..=9.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Column {
    /// True while the five-bead sits at the reckoning bar.
    upper: bool,
    /// How many lower beads sit at the bar; active beads are indices
    /// `0..lower`, counted from the bar outward.
    lower: u8,
}

impl Column {
    /// Largest digit a column can show.
    pub const MAX_DIGIT: u8 = 9;

    /// Create a column with every bead in its rest position.
    #[inline]
    pub const fn zero() -> Self {
        Self {
            upper: false,
            lower: 0,
        }
    }

    /// Create a column already showing `digit`.
    ///
    /// # Panics
    /// Panics if `digit` is greater than 9.
    pub fn from_digit(digit: u8) -> Self {
        assert!(
            digit <= Self::MAX_DIGIT,
            "Digit {} out of range for a column [0, {}]",
            digit,
            Self::MAX_DIGIT
        );
        Self {
            upper: digit >= UPPER_WEIGHT,
            lower: digit % UPPER_WEIGHT,
        }
    }

    /// The digit this column currently shows.
    #[inline]
    pub const fn digit(&self) -> u8 {
        (if self.upper { UPPER_WEIGHT } else { 0 }) + self.lower
    }

    /// Is the five-bead at the bar?
    #[inline]
    pub const fn upper(&self) -> bool {
        self.upper
    }

    /// How many lower beads are at the bar.
    #[inline]
    pub const fn lower_count(&self) -> u8 {
        self.lower
    }

    /// Is the lower bead at `index` (0 = nearest the bar) at the bar?
    ///
    /// Indices beyond the rod read as inactive.
    #[inline]
    pub const fn lower_bead(&self, index: usize) -> bool {
        index < self.lower as usize
    }

    /// Per-bead state of the lower rod, nearest the bar first.
    pub fn lower_beads(&self) -> [bool; LOWER_BEADS] {
        let mut beads = [false; LOWER_BEADS];
        for bead in beads.iter_mut().take(self.lower as usize) {
            *bead = true;
        }
        beads
    }

    /// Flip the five-bead. Returns the new digit.
    #[inline]
    pub fn toggle_upper(&mut self) -> u8 {
        self.upper = !self.upper;
        self.digit()
    }

    /// Toggle the lower bead at `bead`, sliding its neighbors with it.
    ///
    /// A resting bead moves to the bar together with every bead between it
    /// and the bar; a bead at the bar moves away together with every bead
    /// beyond it. Returns the new digit.
    ///
    /// # Panics
    /// Panics if `bead` is not in `0..LOWER_BEADS`. [`crate::Abacus`]
    /// validates indices before calling.
    pub fn toggle_lower(&mut self, bead: usize) -> u8 {
        assert!(
            bead < LOWER_BEADS,
            "Lower bead index {} out of range (0-{})",
            bead,
            LOWER_BEADS - 1
        );
        if self.lower_bead(bead) {
            // Bead was at the bar: it and everything past it slide away.
            self.lower = bead as u8;
        } else {
            // Bead was resting: it and everything before it slide to the bar.
            self.lower = bead as u8 + 1;
        }
        self.digit()
    }

    /// Return every bead to its rest position.
    #[inline]
    pub fn clear(&mut self) {
        self.upper = false;
        self.lower = 0;
    }

    /// True when the column shows 0.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        !self.upper && self.lower == 0
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column({}+{} = {})",
            if self.upper { UPPER_WEIGHT } else { 0 },
            self.lower,
            self.digit()
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

impl From<Column> for u8 {
    fn from(column: Column) -> Self {
        column.digit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_column() {
        let col = Column::zero();
        assert_eq!(col.digit(), 0);
        assert!(col.is_zero());
        assert!(!col.upper());
        assert_eq!(col.lower_count(), 0);
    }

    #[test]
    fn test_from_digit_roundtrip() {
        for digit in 0..=9 {
            assert_eq!(Column::from_digit(digit).digit(), digit);
        }
    }

    #[test]
    fn test_from_digit_bead_split() {
        let seven = Column::from_digit(7);
        assert!(seven.upper());
        assert_eq!(seven.lower_count(), 2);

        let four = Column::from_digit(4);
        assert!(!four.upper());
        assert_eq!(four.lower_count(), 4);
    }

    #[test]
    fn test_toggle_upper() {
        let mut col = Column::zero();
        assert_eq!(col.toggle_upper(), 5);
        assert_eq!(col.toggle_upper(), 0);
    }

    #[test]
    fn test_activate_slides_prefix() {
        let mut col = Column::zero();
        // Touching bead 2 carries beads 0 and 1 along with it.
        assert_eq!(col.toggle_lower(2), 3);
        assert!(col.lower_bead(0));
        assert!(col.lower_bead(1));
        assert!(col.lower_bead(2));
        assert!(!col.lower_bead(3));
    }

    #[test]
    fn test_deactivate_slides_suffix() {
        let mut col = Column::zero();
        col.toggle_lower(3);
        assert_eq!(col.digit(), 4);
        // Touching active bead 1 pushes beads 1..4 away.
        assert_eq!(col.toggle_lower(1), 1);
        assert!(col.lower_bead(0));
        assert!(!col.lower_bead(1));
        assert!(!col.lower_bead(2));
        assert!(!col.lower_bead(3));
    }

    #[test]
    fn test_eight_retracts_to_six() {
        // Upper bead, then lower beads 0, 1, 2: digit = 5 + 3 = 8.
        let mut col = Column::zero();
        col.toggle_upper();
        col.toggle_lower(0);
        col.toggle_lower(1);
        col.toggle_lower(2);
        assert_eq!(col.digit(), 8);

        // Touching active bead 1 retracts beads 1 and 2: digit = 5 + 1 = 6.
        assert_eq!(col.toggle_lower(1), 6);
    }

    #[test]
    fn test_lower_beads_snapshot() {
        let mut col = Column::zero();
        col.toggle_lower(1);
        assert_eq!(col.lower_beads(), [true, true, false, false]);
    }

    #[test]
    fn test_clear() {
        let mut col = Column::from_digit(9);
        col.clear();
        assert!(col.is_zero());
    }

    #[test]
    fn test_digit_never_exceeds_nine() {
        let mut col = Column::zero();
        col.toggle_upper();
        for bead in 0..LOWER_BEADS {
            col.toggle_lower(bead);
            assert!(col.digit() <= 9);
        }
        assert_eq!(col.digit(), 9);
    }
}
