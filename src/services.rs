// src/services.rs

pub mod auth;
pub mod catalog_service;
pub mod document_service;
pub mod order_draft;
pub mod order_service;
pub mod permission_service;
pub mod report_service;

pub use auth::AuthService;
pub use catalog_service::CatalogService;
pub use document_service::DocumentService;
pub use order_service::OrderService;
pub use permission_service::PermissionService;
pub use report_service::ReportService;
