pub mod client;
pub mod model;
pub mod render;
pub mod router;
pub mod store;
pub mod utils;
pub mod view;

use async_trait::async_trait;
use model::auth::{Credentials, LoginResult, RegisterUser};
use model::data::SessionData;
use model::department::{Department, DepartmentUpdate, NewDepartment};
use model::error::ApiError;
use model::page::Page;
use model::user::User;

// Session provider, the only shared mutable state of the client
#[async_trait]
pub trait SessionStore {
    async fn add(&self, data: SessionData) -> Result<(), model::store::Error>;
    async fn get(&self) -> Result<SessionData, model::store::Error>;
    async fn remove(&self) -> Result<(), model::store::Error>;
}

/// Remote HR API operations. One method per endpoint, no retries and no caching.
#[async_trait]
pub trait HrApi {
    async fn register_user(&self, data: &RegisterUser) -> Result<String, ApiError>;
    async fn login_user(&self, credentials: &Credentials) -> Result<LoginResult, ApiError>;
    async fn create_department(&self, data: &NewDepartment) -> Result<(), ApiError>;
    async fn update_department(
        &self,
        id: &str,
        updates: &DepartmentUpdate,
    ) -> Result<(), ApiError>;
    async fn delete_department(&self, id: &str) -> Result<(), ApiError>;
    async fn get_departments(&self, page: u32) -> Result<Page<Department>, ApiError>;
    async fn assign_employees(&self, id: &str, employee_ids: &[String]) -> Result<(), ApiError>;
    async fn fetch_employee_profile(&self) -> Result<User, ApiError>;
    async fn fetch_employee_department(&self) -> Result<Option<Department>, ApiError>;
    async fn fetch_it_employees_location_a(&self) -> Result<Vec<User>, ApiError>;
    async fn fetch_sales_employees_sorted(&self) -> Result<Vec<User>, ApiError>;
}

pub trait Encryptor {
    fn encrypt(&self, data: &str) -> String;
    fn decrypt(&self, data: &str) -> anyhow::Result<String>;
}
