//! WebAssembly bindings for the abacus tutor.
//!
//! This module provides JavaScript-friendly wrappers around the core model,
//! so a web page can drive the rack and the question generator directly.

use crate::abacus::{Abacus, MAX_COLUMNS};
use crate::quiz::{QuestionGenerator, OPTION_COUNT};
use rand::rngs::StdRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly rack wrapper.
#[wasm_bindgen]
pub struct WasmAbacus {
    rack: Abacus,
}

#[wasm_bindgen]
impl WasmAbacus {
    /// Create a rack with `columns` rods (1 to 19).
    #[wasm_bindgen(constructor)]
    pub fn new(columns: usize) -> Result<WasmAbacus, JsError> {
        if !(1..=MAX_COLUMNS).contains(&columns) {
            return Err(JsError::new(&format!(
                "column count {} out of range (1-{})",
                columns, MAX_COLUMNS
            )));
        }
        Ok(Self {
            rack: Abacus::new(columns),
        })
    }

    /// Flip the five-bead on a column. Returns the column's new digit.
    #[wasm_bindgen]
    pub fn toggle_upper(&mut self, column: usize) -> Result<u8, JsError> {
        self.rack
            .toggle_upper(column)
            .map_err(|e| JsError::new(&format!("{}", e)))
    }

    /// Toggle a lower bead on a column. Returns the column's new digit.
    #[wasm_bindgen]
    pub fn toggle_lower(&mut self, column: usize, bead: usize) -> Result<u8, JsError> {
        self.rack
            .toggle_lower(column, bead)
            .map_err(|e| JsError::new(&format!("{}", e)))
    }

    /// Digit shown on one column.
    #[wasm_bindgen]
    pub fn column_value(&self, column: usize) -> Result<u8, JsError> {
        self.rack
            .column_value(column)
            .map_err(|e| JsError::new(&format!("{}", e)))
    }

    /// The full value on the rack.
    #[wasm_bindgen]
    pub fn value(&self) -> u64 {
        self.rack.value()
    }

    /// Arrange the beads to show `value`.
    #[wasm_bindgen]
    pub fn set_value(&mut self, value: u64) -> Result<(), JsError> {
        self.rack
            .set_value(value)
            .map_err(|e| JsError::new(&format!("{}", e)))
    }

    /// Return every bead to rest.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.rack.reset();
    }

    /// Number of columns.
    #[wasm_bindgen]
    pub fn columns(&self) -> usize {
        self.rack.len()
    }

    /// Is the five-bead on `column` at the bar?
    #[wasm_bindgen]
    pub fn upper_at(&self, column: usize) -> Result<bool, JsError> {
        self.rack
            .column(column)
            .map(|c| c.upper())
            .map_err(|e| JsError::new(&format!("{}", e)))
    }

    /// Lower-bead states on `column` as 0/1 flags, nearest the bar first.
    #[wasm_bindgen]
    pub fn lower_beads_at(&self, column: usize) -> Result<Vec<u8>, JsError> {
        self.rack
            .column(column)
            .map(|c| c.lower_beads().iter().map(|&b| b as u8).collect())
            .map_err(|e| JsError::new(&format!("{}", e)))
    }

    /// All column digits, least significant first.
    #[wasm_bindgen]
    pub fn digits(&self) -> Vec<u8> {
        self.rack.columns().iter().map(|c| c.digit()).collect()
    }

    /// Full rack state as JSON.
    #[wasm_bindgen]
    pub fn state_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.rack).map_err(|e| JsError::new(&format!("{}", e)))
    }
}

#[derive(Serialize)]
struct Round {
    question: String,
    answer: u8,
    options: [u8; OPTION_COUNT],
}

/// WebAssembly-friendly question generator.
///
/// Seeded from JavaScript (for example with `Date.now()`), so the page
/// controls reproducibility and no browser entropy wiring is needed.
#[wasm_bindgen]
pub struct WasmQuiz {
    generator: QuestionGenerator<StdRng>,
}

#[wasm_bindgen]
impl WasmQuiz {
    /// Create a generator from a seed. Same seed, same questions.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Self {
        Self {
            generator: QuestionGenerator::seeded(seed),
        }
    }

    /// The next question with its option set, as JSON:
    /// `{"question":"7 + 3","answer":10,"options":[10,7,12,9]}`.
    #[wasm_bindgen]
    pub fn next_round(&mut self) -> Result<String, JsError> {
        let question = self.generator.next_question();
        let options = self
            .generator
            .options(question.answer())
            .map_err(|e| JsError::new(&format!("{}", e)))?;

        let round = Round {
            question: question.prompt(),
            answer: question.answer(),
            options,
        };
        serde_json::to_string(&round).map_err(|e| JsError::new(&format!("{}", e)))
    }
}
