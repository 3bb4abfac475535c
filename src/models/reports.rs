// src/models/reports.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::department::Department;
use crate::models::orders::OrderStatus;

// Linha achatada de encomenda usada em listagens e na exportação CSV
// (já com o nome do cliente resolvido via JOIN).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub customer_name: Option<String>,
    pub department: Department,
    pub status: OrderStatus,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdersSummary {
    #[schema(example = 42)]
    pub total: usize,
    #[schema(example = 7)]
    pub pendentes: usize,
    #[schema(example = "10540.00")]
    pub valor_total: Decimal,
}
