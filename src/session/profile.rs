//! Learner profile captured on the registration screen.

use serde::{Deserialize, Serialize};

/// Who is using the tutor. All fields are free text from the form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    /// The learner's name, used in greetings.
    pub name: String,
    /// Birth date as entered.
    pub birth_date: String,
    /// School standard (grade).
    pub standard: String,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        birth_date: impl Into<String>,
        standard: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            birth_date: birth_date.into(),
            standard: standard.into(),
        }
    }

    /// The profile used by the try-it-first path, skipping registration.
    pub fn demo() -> Self {
        Self::new("Demo User", "", "")
    }

    /// Registration requires every field filled in.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.birth_date.trim().is_empty()
            && !self.standard.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_profile() {
        let profile = Profile::new("Asha", "2017-04-02", "3rd");
        assert!(profile.is_complete());
    }

    #[test]
    fn test_blank_fields_are_incomplete() {
        assert!(!Profile::default().is_complete());
        assert!(!Profile::new("Asha", "  ", "3rd").is_complete());
        assert!(!Profile::demo().is_complete());
    }
}
