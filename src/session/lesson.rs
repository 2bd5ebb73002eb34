//! The guided lesson walkthrough.
//!
//! Four fixed steps introduce the abacus and the digits 0-9. Steps with a
//! target value ask the learner to arrange the beads until the rack shows
//! that number.

use serde::{Deserialize, Serialize};

/// One step of the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub title: &'static str,
    pub description: &'static str,
    /// The explanation shown on the lesson card.
    pub content: &'static str,
    /// Value the learner should form, if the step has an exercise.
    pub target: Option<u64>,
    /// Decoration for the lesson card.
    pub emblem: &'static str,
}

/// The walkthrough steps, in teaching order.
pub const LESSONS: [Lesson; 4] = [
    Lesson {
        title: "Meet the abacus",
        description: "Learn the parts of the abacus",
        content: "This is your abacus! Each red bead above the bar counts 5, \
                  each blue bead below it counts 1.",
        target: None,
        emblem: "🧮",
    },
    Lesson {
        title: "Making 1 to 4",
        description: "Form small numbers",
        content: "Slide lower beads toward the bar. Every bead at the bar \
                  adds 1.",
        target: Some(3),
        emblem: "1️⃣",
    },
    Lesson {
        title: "Making 5",
        description: "Use the upper bead for 5",
        content: "Slide the red upper bead to the bar. On its own it makes 5.",
        target: Some(5),
        emblem: "5️⃣",
    },
    Lesson {
        title: "Making 6 to 9",
        description: "5 plus a small number",
        content: "The upper bead (5) together with lower beads (1-4) makes \
                  6, 7, 8 and 9.",
        target: Some(7),
        emblem: "🔢",
    },
];

/// Cursor over [`LESSONS`] with bounded navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LessonWalkthrough {
    step: usize,
}

impl LessonWalkthrough {
    pub fn new() -> Self {
        Self::default()
    }

    /// The step currently shown.
    pub fn current(&self) -> &'static Lesson {
        &LESSONS[self.step]
    }

    /// Zero-based step index.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn total(&self) -> usize {
        LESSONS.len()
    }

    /// Advance one step. Returns false at the final step.
    pub fn next(&mut self) -> bool {
        if self.step + 1 < LESSONS.len() {
            self.step += 1;
            true
        } else {
            false
        }
    }

    /// Go back one step. Returns false at the first step.
    pub fn prev(&mut self) -> bool {
        if self.step > 0 {
            self.step -= 1;
            true
        } else {
            false
        }
    }

    /// Is the final step showing?
    pub fn is_last(&self) -> bool {
        self.step + 1 == LESSONS.len()
    }

    /// Has the learner formed the step's target on the rack?
    ///
    /// Steps without a target never report success; there is nothing to do.
    pub fn target_met(&self, rack_value: u64) -> bool {
        self.current().target == Some(rack_value)
    }

    /// Walkthrough completion, in percent, for the progress bar.
    pub fn progress_percent(&self) -> u16 {
        (((self.step + 1) * 100) / LESSONS.len()) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_bounds() {
        let mut walk = LessonWalkthrough::new();
        assert!(!walk.prev());
        assert_eq!(walk.step(), 0);

        assert!(walk.next());
        assert!(walk.next());
        assert!(walk.next());
        assert!(walk.is_last());
        assert!(!walk.next());
        assert_eq!(walk.step(), 3);
    }

    #[test]
    fn test_targets_in_teaching_order() {
        assert_eq!(LESSONS[0].target, None);
        assert_eq!(LESSONS[1].target, Some(3));
        assert_eq!(LESSONS[2].target, Some(5));
        assert_eq!(LESSONS[3].target, Some(7));
    }

    #[test]
    fn test_target_check() {
        let mut walk = LessonWalkthrough::new();
        // The intro step has no exercise.
        assert!(!walk.target_met(0));

        walk.next();
        assert!(walk.target_met(3));
        assert!(!walk.target_met(4));
    }

    #[test]
    fn test_progress_percent() {
        let mut walk = LessonWalkthrough::new();
        assert_eq!(walk.progress_percent(), 25);
        walk.next();
        walk.next();
        walk.next();
        assert_eq!(walk.progress_percent(), 100);
    }
}
