// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::department::Department;

// O catálogo de produtos, sempre particionado por departamento.
// Exclusão é lógica: active = false tira o produto de circulação sem
// quebrar as encomendas antigas que o referenciam.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "Geladeira Frost Free 400L")]
    pub name: String,
    #[schema(example = "EL001")]
    pub code: Option<String>,
    pub description: Option<String>,
    #[schema(example = "1299.99")]
    pub price: Decimal,
    pub department: Department,
    pub warehouse_id: Option<Uuid>,
    // Fator de conversão caixa -> peças. 1 quando o produto não é vendido
    // em caixa fechada.
    #[schema(example = 12)]
    pub pecas_por_caixa: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Armazém de onde a encomenda será levantada.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: Uuid,
    #[schema(example = "Armazém Central")]
    pub name: String,
    pub department: Department,
    pub address: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    #[schema(example = "1299.99")]
    pub price: Decimal,
    pub department: Department,
    pub warehouse_id: Option<Uuid>,
    #[serde(default = "default_pecas_por_caixa")]
    #[validate(range(min = 1, message = "O fator de conversão deve ser no mínimo 1."))]
    pub pecas_por_caixa: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub warehouse_id: Option<Uuid>,
    #[serde(default = "default_pecas_por_caixa")]
    #[validate(range(min = 1, message = "O fator de conversão deve ser no mínimo 1."))]
    pub pecas_por_caixa: i32,
}

fn default_pecas_por_caixa() -> i32 {
    1
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehousePayload {
    #[validate(length(min = 1, message = "O nome do armazém é obrigatório."))]
    pub name: String,
    pub department: Department,
    pub address: Option<String>,
}

// Resultado da importação em massa do catálogo. As linhas boas entram e
// as ruins são devolvidas uma a uma, com o número da linha na planilha.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    #[schema(example = 18)]
    pub criados: usize,
    pub erros: Vec<ImportRowError>,
}

#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    // Número da linha no arquivo original (o cabeçalho é a linha 1)
    #[schema(example = 4)]
    pub linha: usize,
    #[schema(example = "Preço inválido: 'abc'")]
    pub erro: String,
}
