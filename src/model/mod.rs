pub mod auth;
pub mod config;
pub mod data;
pub mod department;
pub mod error;
pub mod page;
pub mod store;
pub mod user;
