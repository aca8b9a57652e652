use super::ProgramId;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Student {
    pub first_names: String,
    pub given_names: String,
    pub matriculation_number: String,
    /// Term code such as `20242`, compared as text only.
    pub semester: String,
    pub programs: Vec<ProgramId>,
}

impl Student {
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.given_names, self.first_names)
    }

    pub fn has_any_program(&self, programs: &[ProgramId]) -> bool {
        self.programs.iter().any(|p| programs.contains(p))
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.matriculation_number)
    }
}
