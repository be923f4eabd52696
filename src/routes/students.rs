use crate::{
    data::student::{CandidateStudent, CandidateStudentChanges, Student},
    error::{MissingStudentSnafu, RosterResult},
    state::RosterState,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use snafu::OptionExt;
use uuid::Uuid;

pub fn routes() -> Router<RosterState> {
    Router::new()
        .route("/students", get(get_students).post(post_student))
        .route("/students/", get(get_students).post(post_student))
        .route(
            "/students/{id}",
            get(get_student).put(put_student).delete(delete_student),
        )
}

pub async fn get_students(State(state): State<RosterState>) -> RosterResult<Json<Vec<Student>>> {
    Ok(Json(state.all_students().await?))
}

pub async fn get_student(
    State(state): State<RosterState>,
    Path(id): Path<Uuid>,
) -> RosterResult<Json<Student>> {
    let student = state
        .student_by_id(id)
        .await?
        .context(MissingStudentSnafu { id })?;
    Ok(Json(student))
}

pub async fn post_student(
    State(state): State<RosterState>,
    Json(candidate): Json<CandidateStudent>,
) -> RosterResult<(StatusCode, Json<Student>)> {
    let new_student = candidate.into_new_student()?;
    let student = state.insert_student(new_student).await?;

    info!(id = %student.id, "Created student");
    Ok((StatusCode::CREATED, Json(student)))
}

/// Applies whichever of `firstName`, `lastName` and `email` are in the body.
pub async fn put_student(
    State(state): State<RosterState>,
    Path(id): Path<Uuid>,
    Json(candidate): Json<CandidateStudentChanges>,
) -> RosterResult<Json<Student>> {
    let changes = candidate.into_changes()?;

    let student = if changes.is_empty() {
        let student = state.student_by_id(id).await?;
        debug!(%id, "Empty update, returning student unchanged");
        student
    } else {
        let student = state.update_student(id, changes).await?;
        if student.is_some() {
            info!(%id, "Updated student");
        }
        student
    }
    .context(MissingStudentSnafu { id })?;

    Ok(Json(student))
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Path(id): Path<Uuid>,
) -> RosterResult<StatusCode> {
    if state.remove_student(id).await? {
        info!(%id, "Deleted student");
    } else {
        debug!(%id, "No student to delete");
    }

    Ok(StatusCode::NO_CONTENT)
}
