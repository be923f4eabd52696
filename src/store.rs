use crate::{
    data::{
        student::{NewStudent, Student, StudentChanges},
        test::{NewTest, Test},
    },
    error::RosterResult,
};
use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Persistence boundary for students and their tests.
///
/// Every method is a single round trip to the backing store, and no method spans more than one
/// statement.
#[async_trait]
pub trait RecordStore: Debug + Send + Sync {
    async fn all_students(&self) -> RosterResult<Vec<Student>>;
    async fn student_by_id(&self, id: Uuid) -> RosterResult<Option<Student>>;
    async fn insert_student(&self, student: NewStudent) -> RosterResult<Student>;
    /// `None` when no student has that id.
    async fn update_student(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> RosterResult<Option<Student>>;
    /// Whether a student was actually removed. Their tests go with them.
    async fn remove_student(&self, id: Uuid) -> RosterResult<bool>;

    async fn all_tests(&self) -> RosterResult<Vec<Test>>;
    async fn test_by_id(&self, id: Uuid) -> RosterResult<Option<Test>>;
    /// `None` when the owning student does not exist, in which case nothing is inserted.
    async fn insert_test_for_student(
        &self,
        student_id: Uuid,
        test: NewTest,
    ) -> RosterResult<Option<Test>>;

    async fn close(&self);
}
