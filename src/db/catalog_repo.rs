// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Product, Warehouse},
    models::department::Department,
};

const PRODUCT_COLUMNS: &str = "id, name, code, description, price, department, \
     warehouse_id, pecas_por_caixa, active, created_at, updated_at";

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    /// Produtos ativos, opcionalmente restritos a um departamento.
    /// A busca textual fica fora daqui: é uma projeção pura no service.
    pub async fn list_active_products<'e, E>(
        &self,
        executor: E,
        department: Option<Department>,
    ) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = match department {
            Some(dep) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products \
                     WHERE department = $1 AND active = true ORDER BY name ASC"
                ))
                .bind(dep)
                .fetch_all(executor)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products \
                     WHERE active = true ORDER BY name ASC"
                ))
                .fetch_all(executor)
                .await?
            }
        };

        Ok(products)
    }

    /// Carrega os produtos de uma submissão de encomenda, já restritos ao
    /// departamento dela. Produto de outro departamento simplesmente não volta.
    pub async fn find_products_for_order<'e, E>(
        &self,
        executor: E,
        ids: &[Uuid],
        department: Department,
    ) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE id = ANY($1) AND department = $2 AND active = true"
        ))
        .bind(ids)
        .bind(department)
        .fetch_all(executor)
        .await?;

        Ok(products)
    }

    pub async fn find_product_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        name: &str,
        code: Option<&str>,
        description: Option<&str>,
        price: Decimal,
        department: Department,
        warehouse_id: Option<Uuid>,
        pecas_por_caixa: i32,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products \
                 (name, code, description, price, department, warehouse_id, pecas_por_caixa) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(name)
        .bind(code)
        .bind(description)
        .bind(price)
        .bind(department)
        .bind(warehouse_id)
        .bind(pecas_por_caixa)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        code: Option<&str>,
        description: Option<&str>,
        price: Decimal,
        warehouse_id: Option<Uuid>,
        pecas_por_caixa: i32,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products \
             SET name = $2, code = $3, description = $4, price = $5, \
                 warehouse_id = $6, pecas_por_caixa = $7, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(code)
        .bind(description)
        .bind(price)
        .bind(warehouse_id)
        .bind(pecas_por_caixa)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))?;

        Ok(product)
    }

    // Exclusão lógica: o produto sai do catálogo mas as encomendas antigas
    // continuam apontando para ele.
    pub async fn deactivate_product<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE products SET active = false, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Produto não encontrado.".into()));
        }
        Ok(())
    }

    // =========================================================================
    //  ARMAZÉNS
    // =========================================================================

    pub async fn list_warehouses<'e, E>(
        &self,
        executor: E,
        department: Option<Department>,
    ) -> Result<Vec<Warehouse>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let warehouses = match department {
            Some(dep) => {
                sqlx::query_as::<_, Warehouse>(
                    "SELECT id, name, department, address, active, created_at \
                     FROM warehouses WHERE department = $1 AND active = true \
                     ORDER BY name ASC",
                )
                .bind(dep)
                .fetch_all(executor)
                .await?
            }
            None => {
                sqlx::query_as::<_, Warehouse>(
                    "SELECT id, name, department, address, active, created_at \
                     FROM warehouses WHERE active = true ORDER BY name ASC",
                )
                .fetch_all(executor)
                .await?
            }
        };

        Ok(warehouses)
    }

    /// Usado pela importação em massa: a planilha traz o armazém pelo nome.
    pub async fn find_warehouse_by_name<'e, E>(
        &self,
        executor: E,
        name: &str,
        department: Department,
    ) -> Result<Option<Warehouse>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, department, address, active, created_at \
             FROM warehouses \
             WHERE lower(name) = lower($1) AND department = $2 AND active = true",
        )
        .bind(name)
        .bind(department)
        .fetch_optional(executor)
        .await?;

        Ok(warehouse)
    }

    pub async fn create_warehouse<'e, E>(
        &self,
        executor: E,
        name: &str,
        department: Department,
        address: Option<&str>,
    ) -> Result<Warehouse, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            "INSERT INTO warehouses (name, department, address) \
             VALUES ($1, $2, $3) \
             RETURNING id, name, department, address, active, created_at",
        )
        .bind(name)
        .bind(department)
        .bind(address)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "Já existe um armazém '{}' neste departamento.",
                        name
                    ));
                }
            }
            e.into()
        })?;

        Ok(warehouse)
    }
}
