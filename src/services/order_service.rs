// src/services/order_service.rs

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, CustomerRepository, OrderRepository},
    models::auth::{Role, User},
    models::catalog::Product,
    models::orders::{
        CreateOrderPayload, Order, OrderDetail, OrderItemPayload, OrderStatus, Quantidade,
    },
    models::rbac::{Permission, VisibilityScope},
    models::reports::OrderRow,
    services::order_draft::{OrderDraft, ProdutoResumo},
};

/// A permissão exigida para levar uma encomenda ao status dado.
pub fn required_permission(novo_status: OrderStatus) -> Permission {
    match novo_status {
        OrderStatus::Aprovada => Permission::ApproveOrders,
        OrderStatus::Rejeitada => Permission::RejectOrders,
        // Marcar como entregue (ou devolver a pendente, se um dia existir)
        // é edição comum
        OrderStatus::Entregue | OrderStatus::Pendente => Permission::EditOrders,
    }
}

/// O recorte de visibilidade também decide quem pode abrir (e portanto
/// mexer em) uma encomenda específica.
pub fn pode_ver(scope: VisibilityScope, order: &Order) -> bool {
    match scope {
        VisibilityScope::Todas => true,
        VisibilityScope::Departamento(dep) => order.department == dep,
        VisibilityScope::Proprias(vendor_id) => order.vendor_id == vendor_id,
    }
}

// Monta o rascunho a partir dos itens da submissão. Itens repetidos do
// mesmo produto são somados numa linha só; produto fora do conjunto
// carregado (inexistente, inativo ou de outro departamento) derruba a
// submissão inteira.
fn build_draft(products: &[Product], items: &[OrderItemPayload]) -> Result<OrderDraft, AppError> {
    let mut draft = OrderDraft::new();

    for item in items {
        let product = products
            .iter()
            .find(|p| p.id == item.product_id)
            .ok_or_else(|| {
                AppError::InvalidInput(
                    "Produto inexistente, inativo ou de outro departamento.".to_string(),
                )
            })?;

        draft.add_or_increment(
            ProdutoResumo {
                id: product.id,
                nome: product.name.clone(),
                preco: product.price,
                pecas_por_caixa: product.pecas_por_caixa,
            },
            Quantidade::new(item.caixas, item.pecas),
        );
    }

    if draft.is_empty() {
        return Err(AppError::InvalidInput(
            "A encomenda deve ter ao menos um item com quantidade.".to_string(),
        ));
    }
    Ok(draft)
}

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    catalog_repo: CatalogRepository,
    customer_repo: CustomerRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        catalog_repo: CatalogRepository,
        customer_repo: CustomerRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            order_repo,
            catalog_repo,
            customer_repo,
            pool,
        }
    }

    /// Submete uma encomenda completa. Cliente e cabeçalho entram juntos
    /// numa transação; os itens entram em seguida, um a um. Se um item
    /// falhar depois do cabeçalho gravado, a falha é reportada como
    /// parcial, com o id da encomenda, em vez de fingir que nada foi
    /// gravado.
    pub async fn submit_order(
        &self,
        vendor: &User,
        payload: CreateOrderPayload,
    ) -> Result<Order, AppError> {
        payload.validate()?;

        // Vendedor e supervisor só registram no próprio departamento
        if vendor.role != Role::Admin {
            if let Some(dep) = vendor.department {
                if dep != payload.department {
                    return Err(AppError::Forbidden(
                        "Você só pode registrar encomendas do seu departamento.".to_string(),
                    ));
                }
            }
        }

        let ids: Vec<Uuid> = payload.items.iter().map(|i| i.product_id).collect();
        let products = self
            .catalog_repo
            .find_products_for_order(&self.pool, &ids, payload.department)
            .await?;

        let draft = build_draft(&products, &payload.items)?;
        let totals = draft.totals();

        let mut tx = self.pool.begin().await?;

        let customer = self
            .customer_repo
            .resolve_by_phone(
                &mut *tx,
                &payload.customer.name,
                &payload.customer.phone,
                &payload.customer.location,
                payload.customer.email.as_deref(),
            )
            .await?;

        let order = self
            .order_repo
            .create_header(
                &mut *tx,
                customer.id,
                vendor.id,
                payload.department,
                payload.warehouse_id,
                totals.valor,
                payload.notes.as_deref(),
            )
            .await?;

        tx.commit().await?;

        // A partir daqui o cabeçalho existe; falha de item vira parcial
        for item in draft.itens() {
            let inserted = self
                .order_repo
                .add_item(
                    &self.pool,
                    order.id,
                    item.produto.id,
                    &item.produto.nome,
                    item.quantidade.caixas,
                    item.quantidade.pecas,
                    item.produto.pecas_por_caixa,
                    item.produto.preco,
                )
                .await;

            if let Err(e) = inserted {
                tracing::error!(
                    "⚠️ Encomenda {} gravada sem todos os itens: {}",
                    order.id,
                    e
                );
                return Err(AppError::EncomendaParcial { order_id: order.id });
            }
        }

        tracing::info!(
            "🧾 Encomenda {} registrada: {} linhas, total {} MT",
            order.id,
            totals.linhas,
            totals.valor
        );
        Ok(order)
    }

    pub async fn list_orders(&self, scope: VisibilityScope) -> Result<Vec<OrderRow>, AppError> {
        self.order_repo.list_rows(&self.pool, scope).await
    }

    pub async fn get_detail(
        &self,
        scope: VisibilityScope,
        order_id: Uuid,
    ) -> Result<OrderDetail, AppError> {
        let detail = self.order_repo.get_detail(order_id).await?;

        // Fora do recorte responde como inexistente, sem revelar que o id existe
        if !pode_ver(scope, &detail.header) {
            return Err(AppError::NotFound("Encomenda não encontrada.".to_string()));
        }
        Ok(detail)
    }

    /// Muda o status respeitando o ciclo de vida. A verificação de
    /// permissão fica no handler; aqui entram o recorte de visibilidade e
    /// a regra de transição.
    pub async fn change_status(
        &self,
        scope: VisibilityScope,
        order_id: Uuid,
        novo_status: OrderStatus,
    ) -> Result<Order, AppError> {
        let order = self
            .order_repo
            .find_by_id(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Encomenda não encontrada.".to_string()))?;

        if !pode_ver(scope, &order) {
            return Err(AppError::NotFound("Encomenda não encontrada.".to_string()));
        }

        if !order.status.pode_transitar(novo_status) {
            return Err(AppError::InvalidInput(format!(
                "Transição de status inválida: {:?} -> {:?}",
                order.status, novo_status
            )));
        }

        self.order_repo
            .update_status(&self.pool, order_id, novo_status)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use crate::models::department::Department;

    fn produto(price: rust_decimal::Decimal, fator: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Produto".to_string(),
            code: None,
            description: None,
            price,
            department: Department::Alimentacao,
            warehouse_id: None,
            pecas_por_caixa: fator,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn encomenda(department: Department, vendor_id: Uuid) -> Order {
        Order {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            vendor_id,
            department,
            warehouse_id: None,
            status: OrderStatus::Pendente,
            total: dec!(0),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn permissao_exigida_por_status() {
        assert_eq!(
            required_permission(OrderStatus::Aprovada),
            Permission::ApproveOrders
        );
        assert_eq!(
            required_permission(OrderStatus::Rejeitada),
            Permission::RejectOrders
        );
        assert_eq!(
            required_permission(OrderStatus::Entregue),
            Permission::EditOrders
        );
    }

    #[test]
    fn recorte_decide_quem_abre_a_encomenda() {
        let vendedor = Uuid::new_v4();
        let outra = encomenda(Department::Cosmeticos, Uuid::new_v4());
        let propria = encomenda(Department::Cosmeticos, vendedor);

        assert!(pode_ver(VisibilityScope::Todas, &outra));
        assert!(pode_ver(
            VisibilityScope::Departamento(Department::Cosmeticos),
            &outra
        ));
        assert!(!pode_ver(
            VisibilityScope::Departamento(Department::Alimentacao),
            &outra
        ));
        assert!(pode_ver(VisibilityScope::Proprias(vendedor), &propria));
        assert!(!pode_ver(VisibilityScope::Proprias(vendedor), &outra));
    }

    #[test]
    fn rascunho_soma_itens_repetidos_e_calcula_o_total() {
        // 2 caixas de 12 + 3 peças a 1.00 = 27.00, mais 4 peças a 2.00 = 35.00
        let sumo = produto(dec!(1.00), 12);
        let sabonete = produto(dec!(2.00), 1);
        let products = vec![sumo.clone(), sabonete.clone()];

        let items = vec![
            OrderItemPayload {
                product_id: sumo.id,
                caixas: 2,
                pecas: 0,
            },
            OrderItemPayload {
                product_id: sabonete.id,
                caixas: 0,
                pecas: 4,
            },
            OrderItemPayload {
                product_id: sumo.id,
                caixas: 0,
                pecas: 3,
            },
        ];

        let draft = build_draft(&products, &items).unwrap();
        assert_eq!(draft.itens().len(), 2);
        assert_eq!(draft.totals().valor, dec!(35.00));
    }

    #[test]
    fn produto_desconhecido_derruba_a_submissao() {
        let products = vec![produto(dec!(1.00), 1)];
        let items = vec![OrderItemPayload {
            product_id: Uuid::new_v4(),
            caixas: 1,
            pecas: 0,
        }];

        assert!(matches!(
            build_draft(&products, &items),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn submissao_sem_quantidade_alguma_e_rejeitada() {
        let p = produto(dec!(1.00), 1);
        let items = vec![OrderItemPayload {
            product_id: p.id,
            caixas: 0,
            pecas: 0,
        }];

        assert!(matches!(
            build_draft(&[p], &items),
            Err(AppError::InvalidInput(_))
        ));
    }
}
