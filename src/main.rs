//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/", get(handlers::users::list_users))
        .route("/{user_id}", put(handlers::users::update_user));

    let catalog_routes = Router::new()
        .route(
            "/products",
            post(handlers::catalog::create_product).get(handlers::catalog::list_products),
        )
        .route(
            "/products/{product_id}",
            put(handlers::catalog::update_product).delete(handlers::catalog::deactivate_product),
        )
        .route("/template", get(handlers::catalog::download_template))
        .route("/import", post(handlers::catalog::import_products));

    let warehouse_routes = Router::new().route(
        "/",
        post(handlers::catalog::create_warehouse).get(handlers::catalog::list_warehouses),
    );

    let customer_routes = Router::new().route("/", get(handlers::customers::list_customers));

    let order_routes = Router::new()
        .route(
            "/",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route("/{order_id}", get(handlers::orders::get_order))
        .route("/{order_id}/status", put(handlers::orders::update_status))
        .route("/{order_id}/fatura", get(handlers::orders::download_fatura));

    let report_routes = Router::new()
        .route("/summary", get(handlers::reports::get_summary))
        .route("/export", get(handlers::reports::export_csv));

    let permission_routes = Router::new()
        .route("/", post(handlers::permissions::create_grant))
        // GET recebe o id do usuário; DELETE recebe o id da concessão
        .route(
            "/{id}",
            get(handlers::permissions::list_grants).delete(handlers::permissions::revoke_grant),
        );

    let announcement_routes = Router::new().route(
        "/",
        post(handlers::announcements::create_announcement)
            .get(handlers::announcements::list_announcements),
    );

    // Tudo que não é login/registro exige o token
    let protected_routes = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/catalog", catalog_routes)
        .nest("/api/warehouses", warehouse_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/orders", order_routes)
        .nest("/api/reports", report_routes)
        .nest("/api/permissions", permission_routes)
        .nest("/api/announcements", announcement_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
