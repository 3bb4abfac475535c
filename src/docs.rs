// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::users::list_users,
        handlers::users::update_user,

        // --- Catalog ---
        handlers::catalog::list_products,
        handlers::catalog::create_product,
        handlers::catalog::update_product,
        handlers::catalog::deactivate_product,
        handlers::catalog::download_template,
        handlers::catalog::import_products,
        handlers::catalog::list_warehouses,
        handlers::catalog::create_warehouse,

        // --- Customers ---
        handlers::customers::list_customers,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_status,
        handlers::orders::download_fatura,

        // --- Reports ---
        handlers::reports::get_summary,
        handlers::reports::export_csv,

        // --- RBAC ---
        handlers::permissions::list_grants,
        handlers::permissions::create_grant,
        handlers::permissions::revoke_grant,

        // --- Announcements ---
        handlers::announcements::list_announcements,
        handlers::announcements::create_announcement,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::AuthResponse,

            // --- Departments ---
            models::department::Department,

            // --- Catalog ---
            models::catalog::Product,
            models::catalog::Warehouse,
            models::catalog::CreateProductPayload,
            models::catalog::UpdateProductPayload,
            models::catalog::CreateWarehousePayload,
            models::catalog::ImportReport,
            models::catalog::ImportRowError,

            // --- Customers ---
            models::customer::Customer,

            // --- Orders ---
            models::orders::OrderStatus,
            models::orders::Order,
            models::orders::OrderItem,
            models::orders::OrderDetail,
            models::orders::CustomerInfoPayload,
            models::orders::OrderItemPayload,
            models::orders::CreateOrderPayload,
            models::orders::UpdateOrderStatusPayload,

            // --- Reports ---
            models::reports::OrderRow,
            models::reports::OrdersSummary,

            // --- RBAC ---
            models::rbac::Permission,
            models::rbac::PermissionGrant,
            models::rbac::CreateGrantPayload,

            // --- Announcements ---
            models::announcements::Announcement,
            models::announcements::CreateAnnouncementPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Usuários, Papéis e Departamentos"),
        (name = "Catalog", description = "Catálogo de Produtos e Armazéns"),
        (name = "Customers", description = "Cadastro de Clientes"),
        (name = "Orders", description = "Registro e Ciclo de Vida das Encomendas"),
        (name = "Reports", description = "Resumos e Exportação"),
        (name = "RBAC", description = "Controle de Acesso (Permissões)"),
        (name = "Announcements", description = "Comunicados Internos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
