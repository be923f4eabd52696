use crate::{
    config::DbConfig,
    data::{
        student::{NewStudent, Student, StudentChanges},
        test::{NewTest, Test},
    },
    error::{EmailSnafu, MakeQuerySnafu, MigrateSnafu, OpenDatabaseSnafu, RosterError, RosterResult},
    store::RecordStore,
};
use async_trait::async_trait;
use email_address::EmailAddress;
use snafu::ResultExt;
use sqlx::{FromRow, Pool, Postgres, postgres::PgPoolOptions};
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    pub async fn connect(options: PgPoolOptions, db_config: &DbConfig) -> RosterResult<Self> {
        let pool = options
            .connect(&db_config.get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self::from_pool(pool))
    }

    /// Wraps a pool whose schema is already migrated.
    pub const fn from_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct StudentRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<StudentRow> for Student {
    type Error = RosterError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::from_str(&row.email).context(EmailSnafu)?;

        Ok(Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn all_students(&self) -> RosterResult<Vec<Student>> {
        sqlx::query_as::<_, StudentRow>(
            "SELECT id, first_name, last_name, email, created_at, updated_at FROM public.students ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .context(MakeQuerySnafu)?
        .into_iter()
        .map(Student::try_from)
        .collect()
    }

    async fn student_by_id(&self, id: Uuid) -> RosterResult<Option<Student>> {
        sqlx::query_as::<_, StudentRow>(
            "SELECT id, first_name, last_name, email, created_at, updated_at FROM public.students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context(MakeQuerySnafu)?
        .map(Student::try_from)
        .transpose()
    }

    async fn insert_student(&self, student: NewStudent) -> RosterResult<Student> {
        sqlx::query_as::<_, StudentRow>(
            "INSERT INTO public.students (first_name, last_name, email) VALUES ($1, $2, $3) RETURNING id, first_name, last_name, email, created_at, updated_at",
        )
        .bind(student.first_name())
        .bind(student.last_name())
        .bind(student.email().as_str())
        .fetch_one(&self.pool)
        .await
        .context(MakeQuerySnafu)?
        .try_into()
    }

    async fn update_student(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> RosterResult<Option<Student>> {
        sqlx::query_as::<_, StudentRow>(
            "UPDATE public.students SET first_name = COALESCE($2, first_name), last_name = COALESCE($3, last_name), email = COALESCE($4, email), updated_at = now() WHERE id = $1 RETURNING id, first_name, last_name, email, created_at, updated_at",
        )
        .bind(id)
        .bind(changes.first_name())
        .bind(changes.last_name())
        .bind(changes.email().map(EmailAddress::as_str))
        .fetch_optional(&self.pool)
        .await
        .context(MakeQuerySnafu)?
        .map(Student::try_from)
        .transpose()
    }

    async fn remove_student(&self, id: Uuid) -> RosterResult<bool> {
        let result = sqlx::query("DELETE FROM public.students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context(MakeQuerySnafu)?;
        Ok(result.rows_affected() > 0)
    }

    async fn all_tests(&self) -> RosterResult<Vec<Test>> {
        sqlx::query_as::<_, Test>(
            "SELECT id, subject, grade, student_id, created_at, updated_at FROM public.tests ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn test_by_id(&self, id: Uuid) -> RosterResult<Option<Test>> {
        sqlx::query_as::<_, Test>(
            "SELECT id, subject, grade, student_id, created_at, updated_at FROM public.tests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn insert_test_for_student(
        &self,
        student_id: Uuid,
        test: NewTest,
    ) -> RosterResult<Option<Test>> {
        //student lookup and insert are one statement
        sqlx::query_as::<_, Test>(
            "INSERT INTO public.tests (subject, grade, student_id) SELECT $1, $2, s.id FROM public.students s WHERE s.id = $3 RETURNING id, subject, grade, student_id, created_at, updated_at",
        )
        .bind(test.subject())
        .bind(test.grade())
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
