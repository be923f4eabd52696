use crate::data::FieldProblem;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snafu::Snafu;
use std::num::ParseIntError;
use uuid::Uuid;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` as a number", name))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Error parsing stored email address"))]
    Email { source: email_address::Error },
    #[snafu(display("{}", FieldProblem::join(problems)))]
    Validation { problems: Vec<FieldProblem> },
    #[snafu(display("Student not found"))]
    MissingStudent { id: Uuid },
    #[snafu(display("Test not found"))]
    MissingTest { id: Uuid },
}

impl RosterError {
    pub const fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        match self {
            Self::OpenDatabase { .. } | Self::MakeQuery { .. } | Self::MigrateError { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParseNumber { .. } => ISE,
            Self::Email { .. } => ISE,
            Self::Validation { .. } => BI,
            Self::MissingStudent { .. } | Self::MissingTest { .. } => NF,
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(?self, %status_code, "Rejected request");
        }

        (status_code, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_records_are_not_found_with_plain_bodies() {
        let id = Uuid::new_v4();

        let student = RosterError::MissingStudent { id };
        assert_eq!(student.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(student.to_string(), "Student not found");

        let test = RosterError::MissingTest { id };
        assert_eq!(test.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(test.to_string(), "Test not found");
    }

    #[test]
    fn validation_lists_every_problem() {
        let err = RosterError::Validation {
            problems: vec![FieldProblem::FirstNameRequired, FieldProblem::EmailInvalid],
        };

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "firstName required, email invalid or required");
    }

    #[test]
    fn store_failures_are_internal() {
        let err = RosterError::MakeQuery {
            source: sqlx::Error::PoolClosed,
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
