use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Entry, EntryId, Pageable, Project, ProjectId, Result, StoreError,
    store::{EntryStore, ProjectStore},
};

/// Runs the database migrations shared by both stores.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}

/// Converts paging into `LIMIT`/`OFFSET` bind values.
///
/// A `NULL` limit means no limit in PostgreSQL.
fn limit_offset(pageable: Pageable) -> (Option<i64>, i64) {
    match pageable {
        Pageable::Paged(request) => (
            Some(i64::from(request.size)),
            i64::try_from(request.offset()).unwrap_or(i64::MAX),
        ),
        Pageable::Unpaged => (None, 0),
    }
}

/// PostgreSQL-backed project store.
#[derive(Clone)]
pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    /// Creates a new PostgreSQL project store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_project(row: PgRow) -> Result<Project> {
        Ok(Project {
            id: Some(ProjectId::new(row.try_get("id")?)),
            name: row.try_get("name")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
        })
    }
}

#[async_trait]
impl ProjectStore for PostgresProjectStore {
    async fn save(&self, project: Project) -> Result<Project> {
        let row = match project.id {
            None => Some(
                sqlx::query(
                    r#"
                    INSERT INTO project (name, start_date, end_date)
                    VALUES ($1, $2, $3)
                    RETURNING id, name, start_date, end_date
                    "#,
                )
                .bind(&project.name)
                .bind(project.start_date)
                .bind(project.end_date)
                .fetch_one(&self.pool)
                .await?,
            ),
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE project SET name = $2, start_date = $3, end_date = $4
                    WHERE id = $1
                    RETURNING id, name, start_date, end_date
                    "#,
                )
                .bind(id.as_i64())
                .bind(&project.name)
                .bind(project.start_date)
                .bind(project.end_date)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        match row {
            Some(row) => Self::row_to_project(row),
            None => Err(StoreError::RecordNotFound {
                table: "project",
                id: project.id.map(|id| id.as_i64()).unwrap_or_default(),
            }),
        }
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>> {
        let row = sqlx::query("SELECT id, name, start_date, end_date FROM project WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_project).transpose()
    }

    async fn exists_by_id(&self, id: ProjectId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM project WHERE id = $1)")
                .bind(id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn delete(&self, project: &Project) -> Result<()> {
        if let Some(id) = project.id {
            sqlx::query("DELETE FROM project WHERE id = $1")
                .bind(id.as_i64())
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    async fn find_all(&self, pageable: Pageable) -> Result<Vec<Project>> {
        let (limit, offset) = limit_offset(pageable);

        let rows = sqlx::query(
            r#"
            SELECT id, name, start_date, end_date
            FROM project
            WHERE id IS NOT NULL
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_project).collect()
    }
}

/// PostgreSQL-backed entry store.
#[derive(Clone)]
pub struct PostgresEntryStore {
    pool: PgPool,
}

impl PostgresEntryStore {
    /// Creates a new PostgreSQL entry store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: PgRow) -> Result<Entry> {
        Ok(Entry {
            id: Some(EntryId::new(row.try_get("id")?)),
            date: row.try_get("date")?,
            time_spent: row.try_get("time_spent")?,
            description: row.try_get("description")?,
            project_id: ProjectId::new(row.try_get("project_id")?),
        })
    }
}

#[async_trait]
impl EntryStore for PostgresEntryStore {
    async fn save(&self, entry: Entry) -> Result<Entry> {
        let row = match entry.id {
            None => Some(
                sqlx::query(
                    r#"
                    INSERT INTO project_entry (date, time_spent, description, project_id)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, date, time_spent, description, project_id
                    "#,
                )
                .bind(entry.date)
                .bind(entry.time_spent)
                .bind(&entry.description)
                .bind(entry.project_id.as_i64())
                .fetch_one(&self.pool)
                .await?,
            ),
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE project_entry
                    SET date = $2, time_spent = $3, description = $4, project_id = $5
                    WHERE id = $1
                    RETURNING id, date, time_spent, description, project_id
                    "#,
                )
                .bind(id.as_i64())
                .bind(entry.date)
                .bind(entry.time_spent)
                .bind(&entry.description)
                .bind(entry.project_id.as_i64())
                .fetch_optional(&self.pool)
                .await?
            }
        };

        match row {
            Some(row) => Self::row_to_entry(row),
            None => Err(StoreError::RecordNotFound {
                table: "project_entry",
                id: entry.id.map(|id| id.as_i64()).unwrap_or_default(),
            }),
        }
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, time_spent, description, project_id
            FROM project_entry
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_entry).transpose()
    }

    async fn find_by_id_and_project_id(
        &self,
        id: EntryId,
        project_id: ProjectId,
    ) -> Result<Option<Entry>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, time_spent, description, project_id
            FROM project_entry
            WHERE id = $1 AND project_id = $2
            "#,
        )
        .bind(id.as_i64())
        .bind(project_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_entry).transpose()
    }

    async fn exists_by_id(&self, id: EntryId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM project_entry WHERE id = $1)")
                .bind(id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn delete(&self, entry: &Entry) -> Result<()> {
        if let Some(id) = entry.id {
            sqlx::query("DELETE FROM project_entry WHERE id = $1")
                .bind(id.as_i64())
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    async fn find_by_project_id(
        &self,
        project_id: ProjectId,
        pageable: Pageable,
    ) -> Result<Vec<Entry>> {
        let (limit, offset) = limit_offset(pageable);

        let rows = sqlx::query(
            r#"
            SELECT id, date, time_spent, description, project_id
            FROM project_entry
            WHERE id IS NOT NULL AND project_id = $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(project_id.as_i64())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_limit_offset() {
        assert_eq!(limit_offset(Pageable::of(2, 25)), (Some(25), 50));
    }

    #[test]
    fn unpaged_has_no_limit() {
        assert_eq!(limit_offset(Pageable::Unpaged), (None, 0));
    }
}
