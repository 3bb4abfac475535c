// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::customer::Customer,
    models::department::Department,
    models::orders::{Order, OrderDetail, OrderItem, OrderStatus},
    models::rbac::VisibilityScope,
    models::reports::OrderRow,
};

const ORDER_COLUMNS: &str = "id, customer_id, vendor_id, department, warehouse_id, \
     status, total, notes, created_at, updated_at";

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grava apenas o cabeçalho. Os itens entram em seguida, um a um, na
    /// ordem da composição — ver OrderService para a semântica de falha
    /// parcial entre as duas etapas.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_header<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        vendor_id: Uuid,
        department: Department,
        warehouse_id: Option<Uuid>,
        total: Decimal,
        notes: Option<&str>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (customer_id, vendor_id, department, warehouse_id, total, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(customer_id)
        .bind(vendor_id)
        .bind(department)
        .bind(warehouse_id)
        .bind(total)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    pub async fn add_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
        product_name: &str,
        caixas: i32,
        pecas: i32,
        pecas_por_caixa: i32,
        unit_price: Decimal,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items
                (order_id, product_id, product_name, caixas, pecas, pecas_por_caixa, unit_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, order_id, product_id, product_name, caixas, pecas,
                      pecas_por_caixa, unit_price, created_at
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(product_name)
        .bind(caixas)
        .bind(pecas)
        .bind(pecas_por_caixa)
        .bind(unit_price)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(order_id)
        .fetch_optional(executor)
        .await?;

        Ok(order)
    }

    /// Listagem achatada (com nome do cliente), recortada pelo papel do
    /// usuário: admin vê tudo, supervisor vê o departamento, vendedor vê
    /// as próprias encomendas.
    pub async fn list_rows<'e, E>(
        &self,
        executor: E,
        scope: VisibilityScope,
    ) -> Result<Vec<OrderRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        const BASE: &str = "SELECT o.id, o.created_at, c.name AS customer_name, \
                 o.department, o.status, o.total \
             FROM orders o \
             LEFT JOIN customers c ON o.customer_id = c.id";

        let rows = match scope {
            VisibilityScope::Todas => {
                sqlx::query_as::<_, OrderRow>(&format!("{BASE} ORDER BY o.created_at DESC"))
                    .fetch_all(executor)
                    .await?
            }
            VisibilityScope::Departamento(dep) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "{BASE} WHERE o.department = $1 ORDER BY o.created_at DESC"
                ))
                .bind(dep)
                .fetch_all(executor)
                .await?
            }
            VisibilityScope::Proprias(vendor_id) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "{BASE} WHERE o.vendor_id = $1 ORDER BY o.created_at DESC"
                ))
                .bind(vendor_id)
                .fetch_all(executor)
                .await?
            }
        };

        Ok(rows)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NotFound("Encomenda não encontrada.".into()))?;

        Ok(order)
    }

    /// Cabeçalho + cliente + nomes auxiliares + itens, para o detalhe e a fatura.
    pub async fn get_detail(&self, order_id: Uuid) -> Result<OrderDetail, AppError> {
        let header = self
            .find_by_id(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Encomenda não encontrada.".into()))?;

        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, location, email, created_at, updated_at \
             FROM customers WHERE id = $1",
        )
        .bind(header.customer_id)
        .fetch_one(&self.pool)
        .await?;

        let (vendor_name,): (String,) =
            sqlx::query_as("SELECT name FROM users WHERE id = $1")
                .bind(header.vendor_id)
                .fetch_one(&self.pool)
                .await?;

        let warehouse_name: Option<String> = match header.warehouse_id {
            Some(wid) => sqlx::query_as::<_, (String,)>("SELECT name FROM warehouses WHERE id = $1")
                .bind(wid)
                .fetch_optional(&self.pool)
                .await?
                .map(|(n,)| n),
            None => None,
        };

        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, product_name, caixas, pecas,
                   pecas_por_caixa, unit_price, created_at
            FROM order_items
            WHERE order_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(OrderDetail {
            header,
            customer,
            vendor_name,
            warehouse_name,
            items,
        })
    }
}
