// src/db/customer_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::customer::Customer};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Encontra-ou-cria pelo telefone. Se o cliente já existe, nome e
    /// localização são sobrescritos com os valores da submissão atual
    /// (última escrita vence), preservando a identidade do registro.
    pub async fn resolve_by_phone<'e, E>(
        &self,
        executor: E,
        name: &str,
        phone: &str,
        location: &str,
        email: Option<&str>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, phone, location, email)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (phone) DO UPDATE
                SET name = EXCLUDED.name,
                    location = EXCLUDED.location,
                    email = COALESCE(EXCLUDED.email, customers.email),
                    updated_at = NOW()
            RETURNING id, name, phone, location, email, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(location)
        .bind(email)
        .fetch_one(executor)
        .await?;

        Ok(customer)
    }

    /// Listagem com busca opcional por nome ou telefone.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        search: Option<&str>,
    ) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customers = match search {
            Some(term) => {
                let pattern = format!("%{}%", term);
                sqlx::query_as::<_, Customer>(
                    r#"
                    SELECT id, name, phone, location, email, created_at, updated_at
                    FROM customers
                    WHERE name ILIKE $1 OR phone ILIKE $1
                    ORDER BY name ASC
                    LIMIT 100
                    "#,
                )
                .bind(pattern)
                .fetch_all(executor)
                .await?
            }
            None => {
                sqlx::query_as::<_, Customer>(
                    r#"
                    SELECT id, name, phone, location, email, created_at, updated_at
                    FROM customers
                    ORDER BY name ASC
                    LIMIT 100
                    "#,
                )
                .fetch_all(executor)
                .await?
            }
        };

        Ok(customers)
    }
}
