//! Project CRUD and summary endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use chrono::NaiveDate;
use common::ProjectId;
use domain::validation::check_project_name;
use domain::{CreateProject, FieldViolations, PageParams, Project, ProjectSummary, UpdateProject};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use store::{EntryStore, ProjectStore};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

/// Body of project create and update requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ProjectRequest {
    /// Checks the name rules and splits the request into its fields.
    fn into_parts(self) -> Result<(String, NaiveDate, Option<NaiveDate>), ApiError> {
        let name = self.name.unwrap_or_default();
        let mut violations = FieldViolations::new();
        check_project_name(&mut violations, &name);
        violations.into_result()?;
        Ok((name, self.start_date, self.end_date))
    }
}

/// Query string of list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl From<PageQuery> for PageParams {
    fn from(query: PageQuery) -> Self {
        PageParams::new(query.page, query.size)
    }
}

// -- Response types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: Option<ProjectId>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl From<Project> for ProjectDto {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            start_date: project.start_date,
            end_date: project.end_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryDto {
    pub total_time_spent: Decimal,
    pub total_days: usize,
    pub average_time_spent_per_day: Decimal,
}

impl From<ProjectSummary> for ProjectSummaryDto {
    fn from(summary: ProjectSummary) -> Self {
        Self {
            total_time_spent: summary.total_time_spent,
            total_days: summary.total_days,
            average_time_spent_per_day: summary.average_time_spent_per_day,
        }
    }
}

/// 201 response carrying the new record's id in `Location`.
pub(crate) type Created<T> = (StatusCode, [(axum::http::HeaderName, String); 1], Json<T>);

pub(crate) fn created<T>(id: impl ToString, body: T) -> Created<T> {
    (StatusCode::CREATED, [(LOCATION, id.to_string())], Json(body))
}

// -- Handlers --

/// POST /api/project: create a project.
#[tracing::instrument(skip(state, payload))]
pub async fn create<P, E>(
    State(state): State<Arc<AppState<P, E>>>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<Created<ProjectDto>, ApiError>
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    let Json(req) = payload?;
    let (name, start_date, end_date) = req.into_parts()?;

    let project = state
        .project_service
        .create(CreateProject::new(name, start_date, end_date))
        .await?;

    let id = project.id.map(i64::from).unwrap_or_default();
    Ok(created(id, project.into()))
}

/// GET /api/project/{id}: load one project.
#[tracing::instrument(skip(state))]
pub async fn get<P, E>(
    State(state): State<Arc<AppState<P, E>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProjectDto>, ApiError>
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    let Path(id) = id?;
    let project = state.project_service.get(ProjectId::new(id)).await?;
    Ok(Json(project.into()))
}

/// GET /api/project?page=&size=: list one page of projects.
#[tracing::instrument(skip(state))]
pub async fn list<P, E>(
    State(state): State<Arc<AppState<P, E>>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<ProjectDto>>, ApiError>
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    let Query(query) = query?;
    let projects = state.project_service.search(query.into()).await?;
    Ok(Json(projects.into_iter().map(ProjectDto::from).collect()))
}

/// PUT /api/project/{id}: overwrite name and dates.
#[tracing::instrument(skip(state, payload))]
pub async fn update<P, E>(
    State(state): State<Arc<AppState<P, E>>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<Json<ProjectDto>, ApiError>
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    let Json(req) = payload?;
    let Path(id) = id?;
    let (name, start_date, end_date) = req.into_parts()?;

    let project = state
        .project_service
        .update(UpdateProject::new(
            ProjectId::new(id),
            name,
            start_date,
            end_date,
        ))
        .await?;
    Ok(Json(project.into()))
}

/// DELETE /api/project/{id}: remove a project.
#[tracing::instrument(skip(state))]
pub async fn delete<P, E>(
    State(state): State<Arc<AppState<P, E>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    let Path(id) = id?;
    state.project_service.delete(ProjectId::new(id)).await?;
    Ok(StatusCode::OK)
}

/// GET /api/project/{id}/summary: aggregate the project's entries.
#[tracing::instrument(skip(state))]
pub async fn summary<P, E>(
    State(state): State<Arc<AppState<P, E>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProjectSummaryDto>, ApiError>
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    let Path(id) = id?;
    let summary = state.project_service.get_summary(ProjectId::new(id)).await?;
    Ok(Json(summary.into()))
}
