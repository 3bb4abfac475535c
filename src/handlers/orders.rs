// src/handlers/orders.rs

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::orders::{CreateOrderPayload, Order, OrderDetail, UpdateOrderStatusPayload},
    models::rbac::Permission,
    models::reports::OrderRow,
    services::order_service,
    services::permission_service,
};

// POST /api/orders
// Submete a encomenda inteira de uma vez: cliente, cabeçalho e itens.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Encomenda registrada", body = Order),
        (status = 400, description = "Itens inválidos ou vazios"),
        (status = 500, description = "Gravação parcial; o corpo traz o orderId")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .permission_service
        .require(&user, Permission::CreateOrders, Some(payload.department))
        .await?;

    let order = app_state.order_service.submit_order(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders
// A listagem sai recortada pelo papel: admin tudo, supervisor o
// departamento, vendedor as próprias.
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "Encomendas visíveis ao usuário", body = [OrderRow])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<OrderRow>>, AppError> {
    let scope = permission_service::visibility_scope(&user);
    let rows = app_state.order_service.list_orders(scope).await?;
    Ok(Json(rows))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}",
    tag = "Orders",
    responses(
        (status = 200, description = "Detalhe da encomenda", body = OrderDetail),
        (status = 404, description = "Inexistente ou fora do recorte do usuário")
    ),
    params(
        ("order_id" = Uuid, Path, description = "ID da encomenda")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderDetail>, AppError> {
    let scope = permission_service::visibility_scope(&user);
    let detail = app_state.order_service.get_detail(scope, order_id).await?;
    Ok(Json(detail))
}

// PUT /api/orders/{id}/status
#[utoipa::path(
    put,
    path = "/api/orders/{order_id}/status",
    tag = "Orders",
    request_body = UpdateOrderStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Order),
        (status = 400, description = "Transição inválida"),
        (status = 403, description = "Sem a permissão exigida pelo novo status")
    ),
    params(
        ("order_id" = Uuid, Path, description = "ID da encomenda")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<Json<Order>, AppError> {
    // Cada destino exige a sua permissão (aprovar, rejeitar, editar)
    let exigida = order_service::required_permission(payload.status);
    app_state
        .permission_service
        .require(&user, exigida, user.department)
        .await?;

    let scope = permission_service::visibility_scope(&user);
    let order = app_state
        .order_service
        .change_status(scope, order_id, payload.status)
        .await?;
    Ok(Json(order))
}

// GET /api/orders/{id}/fatura
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}/fatura",
    tag = "Orders",
    responses(
        (status = 200, description = "Fatura em PDF", content_type = "application/pdf"),
        (status = 404, description = "Inexistente ou fora do recorte do usuário")
    ),
    params(
        ("order_id" = Uuid, Path, description = "ID da encomenda")
    ),
    security(("api_jwt" = []))
)]
pub async fn download_fatura(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    // O mesmo recorte da listagem vale para a fatura
    let scope = permission_service::visibility_scope(&user);
    app_state.order_service.get_detail(scope, order_id).await?;

    let (nome_arquivo, pdf) = app_state
        .document_service
        .generate_fatura_pdf(order_id)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", nome_arquivo),
            ),
        ],
        pdf,
    ))
}
