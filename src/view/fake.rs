use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::auth::{Credentials, LoginResult, RegisterUser};
use crate::model::department::{Category, Department, DepartmentUpdate, NewDepartment};
use crate::model::error::ApiError;
use crate::model::page::{Page, PAGE_SIZE};
use crate::model::user::{Role, User};
use crate::HrApi;

/// In-memory [`HrApi`] keeping departments in a vec and recording calls.
pub(crate) struct FakeApi {
    pub departments: Mutex<Vec<Department>>,
    pub calls: Mutex<Vec<String>>,
    pub assigned: Mutex<Vec<(String, Vec<String>)>>,
    pub updates: Mutex<Vec<(String, DepartmentUpdate)>>,
    pub fail: Mutex<Option<ApiError>>,
    pub role: Mutex<Role>,
    next_id: Mutex<u32>,
}

pub(crate) fn user(id: &str, first: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: "Doe".to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        gender: None,
        hobbies: None,
        role,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn department(id: &str, name: &str) -> Department {
    Department {
        id: id.to_string(),
        department_name: name.to_string(),
        category_name: Category::It,
        location: "Athens".to_string(),
        salary: 100.0,
        employees: None,
    }
}

impl FakeApi {
    pub fn new() -> Self {
        FakeApi {
            departments: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            assigned: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            fail: Mutex::new(None),
            role: Mutex::new(Role::Employee),
            next_id: Mutex::new(0),
        }
    }

    pub fn with_departments(count: usize) -> Self {
        let res = FakeApi::new();
        {
            let mut deps = res.departments.lock().unwrap();
            for i in 0..count {
                deps.push(department(&format!("d{}", i), &format!("Dep {}", i)));
            }
            *res.next_id.lock().unwrap() = count as u32;
        }
        res
    }

    pub fn fail_with(&self, err: ApiError) {
        *self.fail.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.fail.lock().unwrap().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HrApi for FakeApi {
    async fn register_user(&self, data: &RegisterUser) -> Result<String, ApiError> {
        self.record(format!("register {}", data.email))?;
        Ok("User registered".to_string())
    }

    async fn login_user(&self, credentials: &Credentials) -> Result<LoginResult, ApiError> {
        self.record(format!("login {}", credentials.email))?;
        let role = self.role.lock().unwrap().clone();
        Ok(LoginResult {
            token: "fake-token".into(),
            user: user("u1", "Ann", role),
        })
    }

    async fn create_department(&self, data: &NewDepartment) -> Result<(), ApiError> {
        self.record(format!("create {}", data.department_name))?;
        let mut id = self.next_id.lock().unwrap();
        self.departments.lock().unwrap().push(Department {
            id: format!("d{}", *id),
            department_name: data.department_name.clone(),
            category_name: data.category_name,
            location: data.location.clone(),
            salary: data.salary,
            employees: None,
        });
        *id += 1;
        Ok(())
    }

    async fn update_department(
        &self,
        id: &str,
        updates: &DepartmentUpdate,
    ) -> Result<(), ApiError> {
        self.record(format!("update {}", id))?;
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), updates.clone()));
        let mut deps = self.departments.lock().unwrap();
        let d = deps
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::NotFound("Department not found".to_string()))?;
        if let Some(v) = &updates.department_name {
            d.department_name = v.clone();
        }
        if let Some(v) = updates.category_name {
            d.category_name = v;
        }
        if let Some(v) = &updates.location {
            d.location = v.clone();
        }
        if let Some(v) = updates.salary {
            d.salary = v;
        }
        Ok(())
    }

    async fn delete_department(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete {}", id))?;
        self.departments.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }

    async fn get_departments(&self, page: u32) -> Result<Page<Department>, ApiError> {
        self.record(format!("list {}", page))?;
        let deps = self.departments.lock().unwrap();
        let start = (page.max(1) as usize - 1) * PAGE_SIZE as usize;
        Ok(Page {
            items: deps
                .iter()
                .skip(start)
                .take(PAGE_SIZE as usize)
                .cloned()
                .collect(),
            total: deps.len() as u64,
        })
    }

    async fn assign_employees(&self, id: &str, employee_ids: &[String]) -> Result<(), ApiError> {
        self.record(format!("assign {}", id))?;
        self.assigned
            .lock()
            .unwrap()
            .push((id.to_string(), employee_ids.to_vec()));
        Ok(())
    }

    async fn fetch_employee_profile(&self) -> Result<User, ApiError> {
        self.record("profile".to_string())?;
        Ok(user("u1", "Ann", Role::Employee))
    }

    async fn fetch_employee_department(&self) -> Result<Option<Department>, ApiError> {
        self.record("own department".to_string())?;
        Ok(self.departments.lock().unwrap().first().cloned())
    }

    async fn fetch_it_employees_location_a(&self) -> Result<Vec<User>, ApiError> {
        self.record("it report".to_string())?;
        Ok(vec![user("u1", "Ann", Role::Employee)])
    }

    async fn fetch_sales_employees_sorted(&self) -> Result<Vec<User>, ApiError> {
        self.record("sales report".to_string())?;
        Ok(vec![
            user("u2", "Bob", Role::Employee),
            user("u3", "Cid", Role::Manager),
        ])
    }
}
