use crate::{
    data::{FieldProblem, present},
    error::{RosterResult, ValidationSnafu},
};
use email_address::{EmailAddress, Options};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Student as submitted by a client, before anything has been checked.
///
/// Unknown keys in the body are ignored, so `id` and the timestamps can never be chosen by the
/// client.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateStudent {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// A validated and normalised student, ready to be inserted.
///
/// Only [`CandidateStudent::into_new_student`] can build one, so every insert has gone through
/// validation and the name normalisation.
#[derive(Debug, Clone)]
pub struct NewStudent {
    first_name: String,
    last_name: String,
    email: EmailAddress,
}

impl NewStudent {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    fn capitalise_names(&mut self) {
        self.first_name = capitalise_first(&self.first_name);
        self.last_name = capitalise_first(&self.last_name);
    }
}

impl CandidateStudent {
    pub fn into_new_student(self) -> RosterResult<NewStudent> {
        let mut problems = vec![];

        let first_name =
            required_name(self.first_name, FieldProblem::FirstNameRequired, &mut problems);
        let last_name =
            required_name(self.last_name, FieldProblem::LastNameRequired, &mut problems);
        let email = parse_email(self.email.as_deref());
        if email.is_none() {
            problems.push(FieldProblem::EmailInvalid);
        }

        let (Some(first_name), Some(last_name), Some(email)) = (first_name, last_name, email)
        else {
            return ValidationSnafu { problems }.fail();
        };

        let mut new_student = NewStudent {
            first_name,
            last_name,
            email,
        };
        new_student.capitalise_names();
        Ok(new_student)
    }
}

/// Partial update to a student. Absent (or `null`) fields are left alone.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateStudentChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Validated partial update. Names are stored as given, updates are not normalised.
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<EmailAddress>,
}

impl StudentChanges {
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub const fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

impl CandidateStudentChanges {
    pub fn into_changes(self) -> RosterResult<StudentChanges> {
        let mut problems = vec![];

        let first_name = self.first_name.and_then(|first_name| {
            required_name(Some(first_name), FieldProblem::FirstNameRequired, &mut problems)
        });
        let last_name = self.last_name.and_then(|last_name| {
            required_name(Some(last_name), FieldProblem::LastNameRequired, &mut problems)
        });
        let email = match self.email.as_deref() {
            None => None,
            Some(email) => {
                let parsed = parse_email(Some(email));
                if parsed.is_none() {
                    problems.push(FieldProblem::EmailInvalid);
                }
                parsed
            }
        };

        if !problems.is_empty() {
            return ValidationSnafu { problems }.fail();
        }

        Ok(StudentChanges {
            first_name,
            last_name,
            email,
        })
    }
}

fn required_name(
    name: Option<String>,
    problem: FieldProblem,
    problems: &mut Vec<FieldProblem>,
) -> Option<String> {
    if present(name.as_deref()).is_none() {
        problems.push(problem);
        return None;
    }
    name
}

/// Bare addresses only: no display text, and the domain needs a top-level part.
fn parse_email(email: Option<&str>) -> Option<EmailAddress> {
    let options = Options::default().without_display_text().with_required_tld();
    present(email).and_then(|email| EmailAddress::parse_with_options(email, options).ok())
}

/// Upper-cases the first character and leaves the rest untouched.
///
/// Characters without an upper-case form (digits, punctuation) come back unchanged.
pub fn capitalise_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
