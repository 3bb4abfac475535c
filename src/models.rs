pub mod announcements;
pub mod auth;
pub mod catalog;
pub mod customer;
pub mod department;
pub mod orders;
pub mod rbac;
pub mod reports;
