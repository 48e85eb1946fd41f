use axum::{
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};

use crate::{
    controller::ReloadOutcome,
    error::{AppError, Result},
    handlers::AppState,
    models::{ReportDescriptor, ReportId},
    render::{render_catalog_text, render_dashboard},
    services::ReportParams,
};

/// Catalog descriptors in display order
pub async fn list_reports() -> Json<Vec<ReportDescriptor>> {
    Json(ReportId::ALL.iter().map(ReportId::descriptor).collect())
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ReportParams>,
) -> Result<impl IntoResponse> {
    let id: ReportId = id.parse().map_err(AppError::ReportNotFound)?;
    let result = state.controller.run_report(id, &params).await;
    Ok((StatusCode::OK, Json(result)))
}

pub async fn get_catalog(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> impl IntoResponse {
    Json(state.controller.run_catalog(&params).await)
}

pub async fn get_cities(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.controller.cities().await)
}

/// Whole catalog as one HTML page
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Html<String> {
    let snapshot = state.controller.snapshot().await;
    let cities = snapshot.cities();
    let selected = params.resolve_city(&snapshot);
    let results = crate::services::run_catalog(&snapshot, &params);

    Html(render_dashboard(
        &results,
        &cities,
        selected.as_deref(),
        &snapshot.summary(),
    ))
}

pub async fn catalog_text(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> impl IntoResponse {
    let results = state.controller.run_catalog(&params).await;
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_catalog_text(&results),
    )
}

/// Re-read the sources and let connected dashboards know
pub async fn reload(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let outcome = state.controller.reload().await?;
    if matches!(outcome, ReloadOutcome::Replaced { .. }) {
        state
            .connection_manager
            .broadcast_snapshot_reloaded(&outcome)
            .await?;
    }
    Ok((StatusCode::OK, Json(outcome)))
}
