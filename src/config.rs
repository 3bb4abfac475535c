// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        AnnouncementRepository, CatalogRepository, CustomerRepository, OrderRepository,
        PermissionRepository, UserRepository,
    },
    services::{
        AuthService, CatalogService, DocumentService, OrderService, PermissionService,
        ReportService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repo: UserRepository,
    pub customer_repo: CustomerRepository,
    pub announcement_repo: AnnouncementRepository,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub order_service: OrderService,
    pub permission_service: PermissionService,
    pub report_service: ReportService,
    pub document_service: DocumentService,
}

impl AppState {
    // Carrega as configurações, conecta no banco e monta os serviços
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let db_pool = match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                pool
            }
            Err(e) => {
                tracing::error!("🔥 Falha ao conectar ao banco de dados: {:?}", e);
                std::process::exit(1);
            }
        };

        let user_repo = UserRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let permission_repo = PermissionRepository::new(db_pool.clone());
        let announcement_repo = AnnouncementRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, db_pool.clone());
        let catalog_service = CatalogService::new(catalog_repo.clone(), db_pool.clone());
        let order_service = OrderService::new(
            order_repo.clone(),
            catalog_repo,
            customer_repo.clone(),
            db_pool.clone(),
        );
        let permission_service = PermissionService::new(permission_repo);
        let report_service = ReportService::new(order_repo.clone(), db_pool.clone());
        let document_service = DocumentService::new(order_repo);

        Ok(Self {
            db_pool,
            user_repo,
            customer_repo,
            announcement_repo,
            auth_service,
            catalog_service,
            order_service,
            permission_service,
            report_service,
            document_service,
        })
    }
}
