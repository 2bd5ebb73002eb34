//! The abacus frame: an ordered row of columns.
//!
//! Column 0 is the least significant digit place, so a rack of `n` columns
//! shows values from 0 to `10^n - 1`. All toggle operations validate their
//! indices and leave the rack untouched on failure.

use crate::abacus::column::{Column, LOWER_BEADS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column count used when none is requested.
pub const DEFAULT_COLUMNS: usize = 4;

/// Largest supported rack. 19 decimal digits is the widest total that
/// still fits a `u64`.
pub const MAX_COLUMNS: usize = 19;

/// A soroban-style abacus: one upper and four lower beads per column.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abacus {
    /// Columns stored from least significant (index 0) to most significant.
    columns: Vec<Column>,
}

impl Abacus {
    /// Create an abacus with `columns` rods, every bead at rest.
    ///
    /// # Panics
    /// Panics if `columns` is 0 or greater than [`MAX_COLUMNS`].
    pub fn new(columns: usize) -> Self {
        assert!(
            columns >= 1 && columns <= MAX_COLUMNS,
            "Column count {} out of range [1, {}]",
            columns,
            MAX_COLUMNS
        );
        Self {
            columns: vec![Column::zero(); columns],
        }
    }

    /// Create an abacus already showing `value`.
    pub fn showing(columns: usize, value: u64) -> Result<Self, AbacusError> {
        let mut rack = Self::new(columns);
        rack.set_value(value)?;
        Ok(rack)
    }

    /// Number of columns on the rack.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false; a rack has at least one column.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All columns, least significant first. For renderers.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// A single column, or `InvalidColumn` when out of range.
    pub fn column(&self, index: usize) -> Result<&Column, AbacusError> {
        self.columns.get(index).ok_or(AbacusError::InvalidColumn {
            index,
            columns: self.columns.len(),
        })
    }

    /// Flip the five-bead on `column`. Returns the column's new digit.
    pub fn toggle_upper(&mut self, column: usize) -> Result<u8, AbacusError> {
        let columns = self.columns.len();
        let col = self
            .columns
            .get_mut(column)
            .ok_or(AbacusError::InvalidColumn {
                index: column,
                columns,
            })?;
        Ok(col.toggle_upper())
    }

    /// Toggle the lower bead `bead` on `column`, sliding the contiguous
    /// stack with it. Returns the column's new digit.
    pub fn toggle_lower(&mut self, column: usize, bead: usize) -> Result<u8, AbacusError> {
        if bead >= LOWER_BEADS {
            return Err(AbacusError::InvalidBead { index: bead });
        }
        let columns = self.columns.len();
        let col = self
            .columns
            .get_mut(column)
            .ok_or(AbacusError::InvalidColumn {
                index: column,
                columns,
            })?;
        Ok(col.toggle_lower(bead))
    }

    /// The digit shown on `column`. Pure read.
    pub fn column_value(&self, column: usize) -> Result<u8, AbacusError> {
        Ok(self.column(column)?.digit())
    }

    /// The full value on the rack: Σ digit(i) · 10^i. Pure read.
    pub fn value(&self) -> u64 {
        let mut total: u64 = 0;
        let mut power: u64 = 1;

        for column in &self.columns {
            total += column.digit() as u64 * power;
            power = power.saturating_mul(10);
        }

        total
    }

    /// Largest value this rack can show: `10^len - 1`.
    pub fn max_value(&self) -> u64 {
        10u64.pow(self.columns.len() as u32) - 1
    }

    /// Arrange the beads to show `value`, one decimal digit per column.
    ///
    /// Fails with `ValueOutOfRange` (rack untouched) when `value` needs
    /// more columns than the rack has.
    pub fn set_value(&mut self, value: u64) -> Result<(), AbacusError> {
        let max = self.max_value();
        if value > max {
            return Err(AbacusError::ValueOutOfRange { value, max });
        }

        let mut rest = value;
        for column in &mut self.columns {
            *column = Column::from_digit((rest % 10) as u8);
            rest /= 10;
        }
        Ok(())
    }

    /// Return every bead on every column to its rest position.
    pub fn reset(&mut self) {
        for column in &mut self.columns {
            column.clear();
        }
    }

    /// True when every column shows 0.
    pub fn is_zero(&self) -> bool {
        self.columns.iter().all(|c| c.is_zero())
    }
}

impl Default for Abacus {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS)
    }
}

impl fmt::Debug for Abacus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Abacus({} = {})", self, self.value())
    }
}

impl fmt::Display for Abacus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Most significant column first, zero-padded to the rack width.
        for column in self.columns.iter().rev() {
            write!(f, "{}", column.digit())?;
        }
        Ok(())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors from abacus operations. Every failure leaves the rack unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbacusError {
    /// Column index beyond the rack.
    InvalidColumn { index: usize, columns: usize },
    /// Lower bead index beyond the rod.
    InvalidBead { index: usize },
    /// Value does not fit on the rack.
    ValueOutOfRange { value: u64, max: u64 },
}

impl fmt::Display for AbacusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbacusError::InvalidColumn { index, columns } => {
                write!(f, "column index {} out of range (0-{})", index, columns - 1)
            }
            AbacusError::InvalidBead { index } => {
                write!(
                    f,
                    "lower bead index {} out of range (0-{})",
                    index,
                    LOWER_BEADS - 1
                )
            }
            AbacusError::ValueOutOfRange { value, max } => {
                write!(f, "value {} does not fit on the rack (max {})", value, max)
            }
        }
    }
}

impl std::error::Error for AbacusError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rack_is_zero() {
        let rack = Abacus::new(4);
        assert_eq!(rack.value(), 0);
        assert!(rack.is_zero());
        assert_eq!(rack.len(), 4);
    }

    #[test]
    fn test_place_values() {
        let mut rack = Abacus::new(2);
        // Column 0 = 7, column 1 = 3 -> 37.
        rack.set_value(37).unwrap();
        assert_eq!(rack.column_value(0).unwrap(), 7);
        assert_eq!(rack.column_value(1).unwrap(), 3);
        assert_eq!(rack.value(), 37);
    }

    #[test]
    fn test_toggles_update_total() {
        let mut rack = Abacus::new(2);

        assert_eq!(rack.toggle_upper(0).unwrap(), 5);
        assert_eq!(rack.value(), 5);

        assert_eq!(rack.toggle_lower(0, 1).unwrap(), 7);
        assert_eq!(rack.value(), 7);

        assert_eq!(rack.toggle_lower(1, 0).unwrap(), 1);
        assert_eq!(rack.value(), 17);
    }

    #[test]
    fn test_invalid_indices_leave_state_alone() {
        let mut rack = Abacus::new(2);
        rack.set_value(42).unwrap();

        assert_eq!(
            rack.toggle_upper(2),
            Err(AbacusError::InvalidColumn {
                index: 2,
                columns: 2
            })
        );
        assert_eq!(
            rack.toggle_lower(0, 4),
            Err(AbacusError::InvalidBead { index: 4 })
        );
        assert_eq!(
            rack.toggle_lower(9, 0),
            Err(AbacusError::InvalidColumn {
                index: 9,
                columns: 2
            })
        );
        assert!(rack.column_value(5).is_err());

        assert_eq!(rack.value(), 42);
    }

    #[test]
    fn test_reset() {
        let mut rack = Abacus::showing(4, 1234).unwrap();
        assert_eq!(rack.value(), 1234);
        rack.reset();
        assert_eq!(rack.value(), 0);
        assert!(rack.is_zero());
    }

    #[test]
    fn test_set_value_bounds() {
        let mut rack = Abacus::new(2);
        assert!(rack.set_value(99).is_ok());
        assert_eq!(
            rack.set_value(100),
            Err(AbacusError::ValueOutOfRange {
                value: 100,
                max: 99
            })
        );
        // Failed set leaves the previous arrangement in place.
        assert_eq!(rack.value(), 99);
    }

    #[test]
    fn test_display_pads_to_width() {
        let rack = Abacus::showing(4, 42).unwrap();
        assert_eq!(format!("{}", rack), "0042");
    }

    #[test]
    fn test_max_value() {
        assert_eq!(Abacus::new(1).max_value(), 9);
        assert_eq!(Abacus::new(4).max_value(), 9_999);
    }

    #[test]
    fn test_widest_rack_roundtrip() {
        let mut rack = Abacus::new(MAX_COLUMNS);
        let value = 9_999_999_999_999_999_999u64;
        rack.set_value(value).unwrap();
        assert_eq!(rack.value(), value);
    }
}

#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    /// One user gesture on the rack.
    #[derive(Debug, Clone, Copy)]
    enum Touch {
        Upper { column: usize },
        Lower { column: usize, bead: usize },
    }

    fn touch_strategy(columns: usize) -> impl Strategy<Value = Touch> {
        prop_oneof![
            (0..columns).prop_map(|column| Touch::Upper { column }),
            (0..columns, 0..LOWER_BEADS).prop_map(|(column, bead)| Touch::Lower { column, bead }),
        ]
    }

    proptest! {
        #[test]
        fn column_digits_stay_in_range(
            touches in proptest::collection::vec(touch_strategy(4), 0..64)
        ) {
            let mut rack = Abacus::new(4);
            for touch in touches {
                match touch {
                    Touch::Upper { column } => {
                        rack.toggle_upper(column).unwrap();
                    }
                    Touch::Lower { column, bead } => {
                        rack.toggle_lower(column, bead).unwrap();
                    }
                }
                for i in 0..rack.len() {
                    prop_assert!(rack.column_value(i).unwrap() <= 9);
                }
            }
        }

        #[test]
        fn total_matches_base_ten_expansion(
            touches in proptest::collection::vec(touch_strategy(4), 0..64)
        ) {
            let mut rack = Abacus::new(4);
            for touch in touches {
                match touch {
                    Touch::Upper { column } => {
                        rack.toggle_upper(column).unwrap();
                    }
                    Touch::Lower { column, bead } => {
                        rack.toggle_lower(column, bead).unwrap();
                    }
                }
            }
            let expansion: u64 = (0..rack.len())
                .map(|i| rack.column_value(i).unwrap() as u64 * 10u64.pow(i as u32))
                .sum();
            prop_assert_eq!(rack.value(), expansion);
        }

        #[test]
        fn set_value_roundtrips(value in 0u64..10_000) {
            let mut rack = Abacus::new(4);
            rack.set_value(value).unwrap();
            prop_assert_eq!(rack.value(), value);
        }

        #[test]
        fn lower_beads_stay_a_prefix(
            touches in proptest::collection::vec(touch_strategy(2), 0..32)
        ) {
            let mut rack = Abacus::new(2);
            for touch in touches {
                match touch {
                    Touch::Upper { column } => {
                        rack.toggle_upper(column).unwrap();
                    }
                    Touch::Lower { column, bead } => {
                        rack.toggle_lower(column, bead).unwrap();
                    }
                }
                for column in rack.columns() {
                    let beads = column.lower_beads();
                    // No inactive bead may sit between active ones.
                    for pair in beads.windows(2) {
                        prop_assert!(pair[0] || !pair[1]);
                    }
                }
            }
        }
    }
}
