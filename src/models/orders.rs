// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::customer::Customer;
use crate::models::department::Department;

// --- Status ---
// Ciclo de vida: pendente -> aprovada | rejeitada, aprovada -> entregue.
// O status é o único campo de uma encomenda que muda depois da criação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pendente,
    Aprovada,
    Rejeitada,
    Entregue,
}

impl OrderStatus {
    pub fn pode_transitar(self, novo: OrderStatus) -> bool {
        matches!(
            (self, novo),
            (OrderStatus::Pendente, OrderStatus::Aprovada)
                | (OrderStatus::Pendente, OrderStatus::Rejeitada)
                | (OrderStatus::Aprovada, OrderStatus::Entregue)
        )
    }
}

// --- Quantidade ---
// O modelo canônico de quantidade: um par (caixas, peças), somado
// componente a componente e nunca negativo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Quantidade {
    #[schema(example = 2)]
    pub caixas: i32,
    #[schema(example = 5)]
    pub pecas: i32,
}

impl Quantidade {
    pub fn new(caixas: i32, pecas: i32) -> Self {
        Self { caixas, pecas }
    }

    /// Componentes negativos são tratados como zero.
    pub fn clamped(self) -> Self {
        Self {
            caixas: self.caixas.max(0),
            pecas: self.pecas.max(0),
        }
    }

    pub fn somar(self, outra: Quantidade) -> Self {
        Self {
            caixas: self.caixas.saturating_add(outra.caixas.max(0)),
            pecas: self.pecas.saturating_add(outra.pecas.max(0)),
        }
    }

    pub fn is_zero(self) -> bool {
        self.caixas <= 0 && self.pecas <= 0
    }

    /// Converte para o total de peças, dado o fator de conversão do produto.
    pub fn total_pecas(self, pecas_por_caixa: i32) -> i64 {
        let fator = i64::from(pecas_por_caixa.max(1));
        i64::from(self.caixas) * fator + i64::from(self.pecas)
    }
}

// --- Encomenda persistida ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    // O vendedor que registrou a encomenda
    pub vendor_id: Uuid,
    pub department: Department,
    pub warehouse_id: Option<Uuid>,
    pub status: OrderStatus,
    // Total congelado no momento da submissão; nunca recalculado depois.
    #[schema(example = "1350.00")]
    pub total: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    // Nome, preço e fator desnormalizados: o item continua legível e
    // faturável mesmo que o produto seja desativado ou alterado.
    pub product_name: String,
    pub caixas: i32,
    pub pecas: i32,
    #[schema(example = 12)]
    pub pecas_por_caixa: i32,
    #[schema(example = "50.00")]
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
}

// --- Payloads de submissão ---

// Dados do cliente embutidos na submissão. O telefone é a identidade:
// o gateway encontra-ou-cria por ele.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfoPayload {
    #[validate(length(min = 2, message = "O nome do cliente deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Amélia Cossa")]
    pub name: String,
    #[validate(length(min = 7, message = "O telefone do cliente é obrigatório."))]
    #[schema(example = "+258841234567")]
    pub phone: String,
    #[validate(length(min = 2, message = "A localização do cliente é obrigatória."))]
    #[schema(example = "Matola, Bairro Fomento")]
    pub location: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
}

// Serialize é necessário porque a validação do payload pai embute o
// valor do campo nos parâmetros do erro.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: Uuid,
    #[serde(default)]
    pub caixas: i32,
    #[serde(default)]
    pub pecas: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(nested)]
    pub customer: CustomerInfoPayload,
    pub department: Department,
    pub warehouse_id: Option<Uuid>,
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "A encomenda deve ter ao menos um item."))]
    pub items: Vec<OrderItemPayload>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: Order,
    pub customer: Customer,
    pub vendor_name: String,
    pub warehouse_name: Option<String>,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transicoes_validas() {
        assert!(OrderStatus::Pendente.pode_transitar(OrderStatus::Aprovada));
        assert!(OrderStatus::Pendente.pode_transitar(OrderStatus::Rejeitada));
        assert!(OrderStatus::Aprovada.pode_transitar(OrderStatus::Entregue));
    }

    #[test]
    fn transicoes_invalidas() {
        assert!(!OrderStatus::Rejeitada.pode_transitar(OrderStatus::Entregue));
        assert!(!OrderStatus::Entregue.pode_transitar(OrderStatus::Pendente));
        assert!(!OrderStatus::Pendente.pode_transitar(OrderStatus::Entregue));
        assert!(!OrderStatus::Aprovada.pode_transitar(OrderStatus::Aprovada));
    }

    #[test]
    fn quantidade_clamp_e_soma() {
        let q = Quantidade::new(-3, 4).clamped();
        assert_eq!(q, Quantidade::new(0, 4));

        let soma = Quantidade::new(1, 2).somar(Quantidade::new(2, -5));
        assert_eq!(soma, Quantidade::new(3, 2));
    }

    #[test]
    fn submissao_sem_itens_e_rejeitada() {
        let payload = CreateOrderPayload {
            customer: CustomerInfoPayload {
                name: "Amélia Cossa".to_string(),
                phone: "+258841234567".to_string(),
                location: "Matola".to_string(),
                email: None,
            },
            department: Department::Alimentacao,
            warehouse_id: None,
            notes: None,
            items: vec![],
        };

        let erros = payload.validate().unwrap_err();
        assert!(erros.field_errors().contains_key("items"));
    }

    #[test]
    fn quantidade_total_pecas_usa_fator() {
        let q = Quantidade::new(2, 3);
        assert_eq!(q.total_pecas(12), 27);
        // Fator inválido cai para 1
        assert_eq!(q.total_pecas(0), 5);
    }
}
