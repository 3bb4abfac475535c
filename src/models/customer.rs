// src/models/customer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Cliente final. O telefone é a chave natural de deduplicação: uma nova
// submissão com o mesmo telefone reaproveita o registro e sobrescreve
// nome/localização (última escrita vence, sem histórico).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    #[schema(example = "João Macamo")]
    pub name: String,
    #[schema(example = "+258840000000")]
    pub phone: String,
    pub location: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
