use crate::{
    data::{
        student::{NewStudent, Student, StudentChanges},
        test::{NewTest, Test},
    },
    error::RosterResult,
    store::RecordStore,
};
use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Store kept entirely in memory, mirroring the Postgres tables (including the cascade from
/// students to tests).
#[derive(Debug, Default)]
pub struct MemoryStore {
    students: RwLock<Vec<Student>>,
    tests: RwLock<Vec<Test>>,
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn all_students(&self) -> RosterResult<Vec<Student>> {
        Ok(self.students.read().await.clone())
    }

    async fn student_by_id(&self, id: Uuid) -> RosterResult<Option<Student>> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .find(|student| student.id == id)
            .cloned())
    }

    async fn insert_student(&self, student: NewStudent) -> RosterResult<Student> {
        let now = OffsetDateTime::now_utc();
        let student = Student {
            id: Uuid::new_v4(),
            first_name: student.first_name().to_string(),
            last_name: student.last_name().to_string(),
            email: student.email().clone(),
            created_at: now,
            updated_at: now,
        };

        self.students.write().await.push(student.clone());
        Ok(student)
    }

    async fn update_student(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> RosterResult<Option<Student>> {
        let mut students = self.students.write().await;
        let Some(student) = students.iter_mut().find(|student| student.id == id) else {
            return Ok(None);
        };

        if let Some(first_name) = changes.first_name() {
            student.first_name = first_name.to_string();
        }
        if let Some(last_name) = changes.last_name() {
            student.last_name = last_name.to_string();
        }
        if let Some(email) = changes.email() {
            student.email = email.clone();
        }
        student.updated_at = OffsetDateTime::now_utc();

        Ok(Some(student.clone()))
    }

    async fn remove_student(&self, id: Uuid) -> RosterResult<bool> {
        let mut students = self.students.write().await;
        let before = students.len();
        students.retain(|student| student.id != id);
        let removed = students.len() != before;

        if removed {
            self.tests
                .write()
                .await
                .retain(|test| test.student_id != id);
        }
        Ok(removed)
    }

    async fn all_tests(&self) -> RosterResult<Vec<Test>> {
        Ok(self.tests.read().await.clone())
    }

    async fn test_by_id(&self, id: Uuid) -> RosterResult<Option<Test>> {
        Ok(self
            .tests
            .read()
            .await
            .iter()
            .find(|test| test.id == id)
            .cloned())
    }

    async fn insert_test_for_student(
        &self,
        student_id: Uuid,
        test: NewTest,
    ) -> RosterResult<Option<Test>> {
        let students = self.students.read().await;
        if !students.iter().any(|student| student.id == student_id) {
            return Ok(None);
        }

        let now = OffsetDateTime::now_utc();
        let test = Test {
            id: Uuid::new_v4(),
            subject: test.subject().to_string(),
            grade: test.grade(),
            student_id,
            created_at: now,
            updated_at: now,
        };

        self.tests.write().await.push(test.clone());
        Ok(Some(test))
    }

    async fn close(&self) {}
}
