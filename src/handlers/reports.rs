// src/handlers/reports.rs

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    middleware::rbac::{PermExportData, PermViewReports, RequirePermission},
    models::department::Department,
    models::reports::OrdersSummary,
    services::permission_service,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    pub department: Option<Department>,
}

// GET /api/reports/summary
// O filtro de departamento estreita o recorte de visibilidade do papel,
// nunca o alarga.
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    params(ReportFilter),
    responses(
        (status = 200, description = "Resumo das encomendas visíveis", body = OrdersSummary),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermViewReports>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<OrdersSummary>, AppError> {
    let scope = permission_service::visibility_scope(&user);
    let summary = app_state
        .report_service
        .summary(scope, filter.department)
        .await?;
    Ok(Json(summary))
}

// GET /api/reports/export
#[utoipa::path(
    get,
    path = "/api/reports/export",
    tag = "Reports",
    params(ReportFilter),
    responses(
        (status = 200, description = "Exportação CSV das encomendas visíveis", content_type = "text/csv"),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_csv(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermExportData>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filter): Query<ReportFilter>,
) -> Result<impl IntoResponse, AppError> {
    let scope = permission_service::visibility_scope(&user);
    let (nome_arquivo, csv) = app_state
        .report_service
        .export_csv(scope, filter.department)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", nome_arquivo),
            ),
        ],
        csv,
    ))
}
