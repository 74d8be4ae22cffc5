//! HTTP API server with observability for the time-tracking service.
//!
//! Provides REST endpoints for projects, their time entries and project
//! summaries, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use domain::{EntryService, ProjectService};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{EntryStore, ProjectStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<P: ProjectStore, E: EntryStore> {
    pub project_service: Arc<ProjectService<P, E>>,
    pub entry_service: Arc<EntryService<E, P>>,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<P, E>(state: Arc<AppState<P, E>>, metrics_handle: PrometheusHandle) -> Router
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    use routes::{entries, projects};

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/api/project",
            get(projects::list::<P, E>).post(projects::create::<P, E>),
        )
        .route(
            "/api/project/{id}",
            get(projects::get::<P, E>)
                .put(projects::update::<P, E>)
                .delete(projects::delete::<P, E>),
        )
        .route("/api/project/{id}/summary", get(projects::summary::<P, E>))
        .route(
            "/api/project/{id}/entry",
            get(entries::list::<P, E>).post(entries::create::<P, E>),
        )
        .route(
            "/api/project/{id}/entry/{entry_id}",
            axum::routing::delete(entries::delete::<P, E>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state, wiring both services over the given
/// stores.
pub fn create_default_state<P, E>(projects: P, entries: E) -> Arc<AppState<P, E>>
where
    P: ProjectStore + Clone + 'static,
    E: EntryStore + 'static,
{
    let entry_service = Arc::new(EntryService::new(entries, projects.clone()));
    let project_service = Arc::new(ProjectService::new(projects, entry_service.clone()));

    Arc::new(AppState {
        project_service,
        entry_service,
    })
}
