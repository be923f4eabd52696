use std::fmt::{self, Display, Formatter};

pub mod student;

/// A single field that failed validation on a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    FirstNameRequired,
    LastNameRequired,
    EmailInvalid,
    SubjectRequired,
    GradeRequired,
    GradeOutOfRange,
}

impl FieldProblem {
    pub fn join(problems: &[Self]) -> String {
        problems
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for FieldProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::FirstNameRequired => "firstName required",
            Self::LastNameRequired => "lastName required",
            Self::EmailInvalid => "email invalid or required",
            Self::SubjectRequired => "subject required",
            Self::GradeRequired => "grade required",
            Self::GradeOutOfRange => "grade must be between 0 and 100",
        };
        f.write_str(msg)
    }
}

/// Treats whitespace-only text the same as a missing field.
pub fn present(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}
