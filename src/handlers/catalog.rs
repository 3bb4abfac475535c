// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::catalog::{
        CreateProductPayload, CreateWarehousePayload, ImportReport, Product, UpdateProductPayload,
        Warehouse,
    },
    models::department::Department,
    models::rbac::Permission,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    pub department: Option<Department>,
    pub search: Option<String>,
}

// =============================================================================
//  PRODUTOS
// =============================================================================

// GET /api/catalog/products
#[utoipa::path(
    get,
    path = "/api/catalog/products",
    tag = "Catalog",
    params(CatalogFilter),
    responses(
        (status = 200, description = "Produtos ativos", body = [Product])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    Query(filter): Query<CatalogFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state
        .catalog_service
        .list_products(filter.department, filter.search.as_deref())
        .await?;
    Ok(Json(products))
}

// POST /api/catalog/products
#[utoipa::path(
    post,
    path = "/api/catalog/products",
    tag = "Catalog",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 403, description = "Sem permissão no departamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    // A permissão é verificada contra o departamento do produto
    app_state
        .permission_service
        .require(&user, Permission::CreateProducts, Some(payload.department))
        .await?;

    let product = app_state.catalog_service.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/catalog/products/{id}
#[utoipa::path(
    put,
    path = "/api/catalog/products/{product_id}",
    tag = "Catalog",
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    params(
        ("product_id" = Uuid, Path, description = "ID do produto")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<Json<Product>, AppError> {
    // A permissão é verificada contra o departamento do produto alvo,
    // não o do usuário
    let alvo = app_state.catalog_service.get_product(product_id).await?;
    app_state
        .permission_service
        .require(&user, Permission::EditProducts, Some(alvo.department))
        .await?;

    let product = app_state
        .catalog_service
        .update_product(product_id, payload)
        .await?;
    Ok(Json(product))
}

// DELETE /api/catalog/products/{id} (exclusão lógica)
#[utoipa::path(
    delete,
    path = "/api/catalog/products/{product_id}",
    tag = "Catalog",
    responses(
        (status = 204, description = "Produto desativado"),
        (status = 404, description = "Produto não encontrado")
    ),
    params(
        ("product_id" = Uuid, Path, description = "ID do produto")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    // Mesmo critério da edição: decide o departamento do produto alvo
    let alvo = app_state.catalog_service.get_product(product_id).await?;
    app_state
        .permission_service
        .require(&user, Permission::DeleteProducts, Some(alvo.department))
        .await?;

    app_state
        .catalog_service
        .deactivate_product(product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  IMPORTAÇÃO EM MASSA
// =============================================================================

// GET /api/catalog/template
#[utoipa::path(
    get,
    path = "/api/catalog/template",
    tag = "Catalog",
    responses(
        (status = 200, description = "Modelo CSV de importação", content_type = "text/csv")
    ),
    security(("api_jwt" = []))
)]
pub async fn download_template(State(app_state): State<AppState>) -> impl IntoResponse {
    let template = app_state.catalog_service.csv_template();
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"modelo_importacao_produtos.csv\"".to_string(),
            ),
        ],
        template,
    )
}

// POST /api/catalog/import
// O corpo é o CSV cru; as linhas ruins voltam no relatório, as boas entram.
#[utoipa::path(
    post,
    path = "/api/catalog/import",
    tag = "Catalog",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Relatório da importação", body = ImportReport),
        (status = 400, description = "Cabeçalho do CSV inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn import_products(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    body: String,
) -> Result<Json<ImportReport>, AppError> {
    // A planilha pode misturar departamentos; exige a permissão global
    app_state
        .permission_service
        .require(&user, Permission::CreateProducts, None)
        .await?;

    let report = app_state.catalog_service.import_csv(&body).await?;
    Ok(Json(report))
}

// =============================================================================
//  ARMAZÉNS
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseFilter {
    pub department: Option<Department>,
}

// GET /api/warehouses
#[utoipa::path(
    get,
    path = "/api/warehouses",
    tag = "Catalog",
    params(WarehouseFilter),
    responses(
        (status = 200, description = "Armazéns ativos", body = [Warehouse])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_warehouses(
    State(app_state): State<AppState>,
    Query(filter): Query<WarehouseFilter>,
) -> Result<Json<Vec<Warehouse>>, AppError> {
    let warehouses = app_state
        .catalog_service
        .list_warehouses(filter.department)
        .await?;
    Ok(Json(warehouses))
}

// POST /api/warehouses
#[utoipa::path(
    post,
    path = "/api/warehouses",
    tag = "Catalog",
    request_body = CreateWarehousePayload,
    responses(
        (status = 201, description = "Armazém criado", body = Warehouse),
        (status = 409, description = "Nome duplicado no departamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_warehouse(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateWarehousePayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .permission_service
        .require(&user, Permission::CreateWarehouses, Some(payload.department))
        .await?;

    let warehouse = app_state.catalog_service.create_warehouse(payload).await?;
    Ok((StatusCode::CREATED, Json(warehouse)))
}
