use async_trait::async_trait;
use serde::{de::IgnoredAny, Deserialize};
use urlencoding::encode;

use crate::model::auth::{Credentials, LoginResponse, LoginResult, MessageResponse, RegisterUser};
use crate::model::config::DEPARTMENTS_PATH;
use crate::model::department::{AssignEmployees, Department, DepartmentUpdate, NewDepartment};
use crate::model::error::ApiError;
use crate::model::page::{ListEnvelope, Page};
use crate::model::user::User;
use crate::HrApi;

use super::http::HttpClient;

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// [`HrApi`] over the remote HTTP API.
pub struct HttpApi {
    client: HttpClient,
}

impl HttpApi {
    pub fn new(client: HttpClient) -> Self {
        HttpApi { client }
    }

    fn department_url(&self, id: &str) -> String {
        format!("{}/{}", DEPARTMENTS_PATH, encode(id))
    }

    fn update_url(&self, id: &str) -> String {
        format!("{}/{}", self.client.config().update_prefix, encode(id))
    }

    fn assign_url(&self, id: &str) -> String {
        format!("{}/assign", self.department_url(id))
    }
}

#[async_trait]
impl HrApi for HttpApi {
    async fn register_user(&self, data: &RegisterUser) -> Result<String, ApiError> {
        tracing::debug!(email = data.email, role = %data.role, "register");
        let res: Option<MessageResponse> = self.client.post("/auth/register", data).await?;
        Ok(res
            .and_then(|r| r.message)
            .unwrap_or_else(|| "Registration successful".to_string()))
    }

    async fn login_user(&self, credentials: &Credentials) -> Result<LoginResult, ApiError> {
        tracing::debug!(email = credentials.email, "login");
        let res: LoginResponse = self.client.post("/auth/login", credentials).await?;
        let res: LoginResult = res.into();
        tracing::debug!(user = res.user.id, role = %res.user.role, "logged in");
        Ok(res)
    }

    async fn create_department(&self, data: &NewDepartment) -> Result<(), ApiError> {
        tracing::debug!(name = data.department_name, "create department");
        let _: IgnoredAny = self.client.post(DEPARTMENTS_PATH, data).await?;
        Ok(())
    }

    async fn update_department(
        &self,
        id: &str,
        updates: &DepartmentUpdate,
    ) -> Result<(), ApiError> {
        tracing::debug!(id, "update department");
        let _: IgnoredAny = self.client.put(&self.update_url(id), updates).await?;
        Ok(())
    }

    async fn delete_department(&self, id: &str) -> Result<(), ApiError> {
        tracing::debug!(id, "delete department");
        let _: IgnoredAny = self.client.delete(&self.department_url(id)).await?;
        Ok(())
    }

    async fn get_departments(&self, page: u32) -> Result<Page<Department>, ApiError> {
        let page = page.max(1);
        let res: ListEnvelope<Department> = self
            .client
            .get(&format!("{}?page={}", DEPARTMENTS_PATH, page))
            .await?;
        let res: Page<Department> = res.into();
        tracing::debug!(page, len = res.items.len(), total = res.total, "got departments");
        Ok(res)
    }

    async fn assign_employees(&self, id: &str, employee_ids: &[String]) -> Result<(), ApiError> {
        tracing::debug!(id, len = employee_ids.len(), "assign employees");
        let body = AssignEmployees { employee_ids };
        let _: IgnoredAny = self.client.post(&self.assign_url(id), &body).await?;
        Ok(())
    }

    async fn fetch_employee_profile(&self) -> Result<User, ApiError> {
        let res: DataEnvelope<User> = self.client.get("/employee/profile").await?;
        Ok(res.data)
    }

    async fn fetch_employee_department(&self) -> Result<Option<Department>, ApiError> {
        let res: DataEnvelope<Option<Department>> = self.client.get("/employee/department").await?;
        Ok(res.data)
    }

    async fn fetch_it_employees_location_a(&self) -> Result<Vec<User>, ApiError> {
        let res: DataEnvelope<Vec<User>> =
            self.client.get("/query/it-employees-location-a").await?;
        tracing::debug!(len = res.data.len(), "got IT employees");
        Ok(res.data)
    }

    async fn fetch_sales_employees_sorted(&self) -> Result<Vec<User>, ApiError> {
        let res: DataEnvelope<Vec<User>> =
            self.client.get("/query/sales-employees-sorted").await?;
        tracing::debug!(len = res.data.len(), "got Sales employees");
        Ok(res.data)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::config::ClientConfig;
    use crate::store::memory::InMemorySessionStore;
    use test_case::test_case;

    fn api(prefix: &str) -> HttpApi {
        let cfg = ClientConfig::new("http://localhost:5000")
            .unwrap()
            .with_update_prefix(prefix);
        let client = HttpClient::new(cfg, Arc::new(InMemorySessionStore::new())).unwrap();
        HttpApi::new(client)
    }

    #[test_case("/department/departments", "d1", "/department/departments/d1"; "default")]
    #[test_case("/departments", "d1", "/departments/d1"; "legacy")]
    #[test_case("/department/departments", "a/b c", "/department/departments/a%2Fb%20c"; "encoded")]
    fn test_update_url(prefix: &str, id: &str, expected: &str) {
        assert_eq!(api(prefix).update_url(id), expected);
    }

    #[test]
    fn test_assign_url() {
        assert_eq!(
            api("/departments").assign_url("d1"),
            "/department/departments/d1/assign"
        );
    }
}
