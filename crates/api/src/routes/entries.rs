//! Time entry endpoints, nested under their project.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{EntryId, ProjectId};
use domain::validation::{check_description, check_project_id, check_time_spent};
use domain::{CreateEntry, Entry, FieldViolations};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use store::{EntryStore, ProjectStore};

use super::projects::{Created, PageQuery, created};
use crate::AppState;
use crate::error::ApiError;

/// Body of an entry create request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRequest {
    pub date: NaiveDate,
    pub time_spent: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDto {
    pub id: Option<EntryId>,
    pub date: NaiveDate,
    pub time_spent: Decimal,
    pub description: Option<String>,
}

impl From<Entry> for EntryDto {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            time_spent: entry.time_spent,
            description: entry.description,
        }
    }
}

/// POST /api/project/{id}/entry: record time against a project.
#[tracing::instrument(skip(state, payload))]
pub async fn create<P, E>(
    State(state): State<Arc<AppState<P, E>>>,
    project_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> Result<Created<EntryDto>, ApiError>
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    // body errors take precedence over a malformed path id
    let Json(req) = payload?;
    let Path(project_id) = project_id?;

    let mut violations = FieldViolations::new();
    check_time_spent(&mut violations, req.time_spent);
    check_description(&mut violations, req.description.as_deref());
    violations.into_result()?;

    let entry = state
        .entry_service
        .create(CreateEntry::new(
            ProjectId::new(project_id),
            req.date,
            req.time_spent,
            req.description,
        ))
        .await?;

    let id = entry.id.map(i64::from).unwrap_or_default();
    Ok(created(id, entry.into()))
}

/// GET /api/project/{id}/entry?page=&size=: list one page of a project's
/// entries.
#[tracing::instrument(skip(state))]
pub async fn list<P, E>(
    State(state): State<Arc<AppState<P, E>>>,
    project_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<EntryDto>>, ApiError>
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    let Path(project_id) = project_id?;
    let Query(query) = query?;

    let mut violations = FieldViolations::new();
    check_project_id(&mut violations, project_id);
    violations.into_result()?;

    let entries = state
        .entry_service
        .search(ProjectId::new(project_id), query.into())
        .await?;
    Ok(Json(entries.into_iter().map(EntryDto::from).collect()))
}

/// DELETE /api/project/{id}/entry/{entry_id}: remove one of the project's
/// entries.
#[tracing::instrument(skip(state))]
pub async fn delete<P, E>(
    State(state): State<Arc<AppState<P, E>>>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    let Path((project_id, id)) = ids?;
    state
        .entry_service
        .delete(EntryId::new(id), ProjectId::new(project_id))
        .await?;
    Ok(StatusCode::OK)
}
