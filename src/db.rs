pub mod announcement_repo;
pub use announcement_repo::AnnouncementRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod permission_repo;
pub use permission_repo::PermissionRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
