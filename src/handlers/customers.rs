// src/handlers/customers.rs

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermViewCustomers, RequirePermission},
    models::customer::Customer,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilter {
    pub search: Option<String>,
}

// GET /api/customers
// Não há criação direta de cliente: o cadastro nasce (e é atualizado)
// pela submissão de encomendas, chaveado pelo telefone.
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Customers",
    params(CustomerFilter),
    responses(
        (status = 200, description = "Clientes cadastrados", body = [Customer]),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermViewCustomers>,
    Query(filter): Query<CustomerFilter>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = app_state
        .customer_repo
        .list(&app_state.db_pool, filter.search.as_deref())
        .await?;
    Ok(Json(customers))
}
