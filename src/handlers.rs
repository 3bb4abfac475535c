// src/handlers.rs

pub mod announcements;
pub mod auth;
pub mod catalog;
pub mod customers;
pub mod orders;
pub mod permissions;
pub mod reports;
pub mod users;
