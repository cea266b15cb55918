//! Department management: a paged table of departments plus create/edit,
//! assign and delete flows. Every successful change reloads the current page
//! from the server; nothing is merged locally.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::model::department::{Category, Department, DepartmentUpdate, NewDepartment};
use crate::model::page::page_count;
use crate::HrApi;

use super::{guarded, required, ViewError};

#[derive(Clone, Debug, PartialEq, Default)]
pub struct DepartmentForm {
    pub department_name: String,
    pub category: Option<Category>,
    pub location: String,
    pub salary: String,
}

impl DepartmentForm {
    pub fn validate(&self) -> Result<NewDepartment, ViewError> {
        required(&self.department_name, "Department name")?;
        let category = self
            .category
            .ok_or_else(|| ViewError::Validation("Category is required".to_string()))?;
        required(&self.location, "Location")?;
        required(&self.salary, "Salary")?;
        let salary: f64 = self
            .salary
            .trim()
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| ViewError::Validation("Salary must be a number".to_string()))?;
        Ok(NewDepartment {
            department_name: self.department_name.trim().to_string(),
            category_name: category,
            location: self.location.trim().to_string(),
            salary,
        })
    }
}

impl From<&Department> for DepartmentForm {
    fn from(d: &Department) -> Self {
        DepartmentForm {
            department_name: d.department_name.clone(),
            category: Some(d.category_name),
            location: d.location.clone(),
            salary: d.salary.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Listing,
    /// `selected` is `None` when creating a new department.
    Editing {
        selected: Option<Department>,
        form: DepartmentForm,
    },
    Assigning {
        department: Department,
        input: String,
    },
    Deleting {
        department: Department,
    },
}

/// Splits the comma separated id list, trimming each entry and keeping order.
pub fn split_employee_ids(input: &str) -> Vec<String> {
    input.split(',').map(|id| id.trim().to_string()).collect()
}

pub struct DepartmentView {
    api: Arc<dyn HrApi + Send + Sync>,
    pub departments: Vec<Department>,
    pub current_page: u32,
    pub total: u64,
    pub mode: Mode,
    pub loading: bool,
    pub error: Option<String>,
}

impl DepartmentView {
    pub fn new(api: Arc<dyn HrApi + Send + Sync>) -> Self {
        DepartmentView {
            api,
            departments: Vec::new(),
            current_page: 1,
            total: 0,
            mode: Mode::Listing,
            loading: false,
            error: None,
        }
    }

    pub fn page_count(&self) -> u64 {
        page_count(self.total)
    }

    pub fn page_buttons(&self) -> Vec<u32> {
        (1..=self.page_count() as u32).collect()
    }

    pub fn find(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    /// Fetches the current page. If the list shrank below the current page the
    /// last existing page is fetched instead.
    pub async fn load(&mut self, cancel: &CancellationToken) -> Result<(), ViewError> {
        self.fetch_page(cancel).await?;
        let pages = self.page_count() as u32;
        if pages > 0 && self.current_page > pages {
            tracing::debug!(page = self.current_page, pages, "page out of range");
            self.current_page = pages;
            self.fetch_page(cancel).await?;
        }
        Ok(())
    }

    pub async fn change_page(
        &mut self,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<(), ViewError> {
        self.current_page = page.max(1);
        self.load(cancel).await
    }

    /// Walks the pages until the department shows up in a listing.
    pub async fn locate(
        &mut self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Department, ViewError> {
        let mut page = 1;
        loop {
            self.change_page(page, cancel).await?;
            if let Some(d) = self.find(id) {
                return Ok(d.clone());
            }
            if page as u64 >= self.page_count() {
                return Err(ViewError::NotFound(id.to_string()));
            }
            page += 1;
        }
    }

    pub fn begin_create(&mut self) {
        self.error = None;
        self.mode = Mode::Editing {
            selected: None,
            form: DepartmentForm::default(),
        };
    }

    pub fn begin_edit(&mut self, department: &Department) {
        self.error = None;
        self.mode = Mode::Editing {
            selected: Some(department.clone()),
            form: department.into(),
        };
    }

    pub fn form_mut(&mut self) -> Option<&mut DepartmentForm> {
        match &mut self.mode {
            Mode::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn begin_assign(&mut self, department: &Department) {
        self.error = None;
        self.mode = Mode::Assigning {
            department: department.clone(),
            input: String::new(),
        };
    }

    pub fn set_assign_input(&mut self, value: &str) {
        if let Mode::Assigning { input, .. } = &mut self.mode {
            *input = value.to_string();
        }
    }

    /// First step of a delete, nothing is sent until [`Self::confirm_delete`].
    pub fn request_delete(&mut self, department: &Department) {
        self.error = None;
        self.mode = Mode::Deleting {
            department: department.clone(),
        };
    }

    pub fn cancel(&mut self) {
        self.mode = Mode::Listing;
    }

    pub async fn submit_form(&mut self, cancel: &CancellationToken) -> Result<(), ViewError> {
        let (selected, form) = match &self.mode {
            Mode::Editing { selected, form } => (selected.clone(), form.clone()),
            _ => return Err(ViewError::NoAction("submit")),
        };
        let res = self.save(selected.as_ref(), &form, cancel).await;
        self.finish(res, cancel).await
    }

    pub async fn submit_assign(&mut self, cancel: &CancellationToken) -> Result<(), ViewError> {
        let (id, input) = match &self.mode {
            Mode::Assigning { department, input } => (department.id.clone(), input.clone()),
            _ => return Err(ViewError::NoAction("assign")),
        };
        let ids = split_employee_ids(&input);
        tracing::debug!(id, len = ids.len(), "assigning");
        let api = self.api.clone();
        let res = self.call(cancel, api.assign_employees(&id, &ids)).await;
        self.finish(res, cancel).await
    }

    pub async fn confirm_delete(&mut self, cancel: &CancellationToken) -> Result<(), ViewError> {
        let id = match &self.mode {
            Mode::Deleting { department } => department.id.clone(),
            _ => return Err(ViewError::NoAction("delete")),
        };
        let api = self.api.clone();
        let res = self.call(cancel, api.delete_department(&id)).await;
        self.finish(res, cancel).await
    }

    async fn save(
        &mut self,
        selected: Option<&Department>,
        form: &DepartmentForm,
        cancel: &CancellationToken,
    ) -> Result<(), ViewError> {
        let wanted = form.validate()?;
        let api = self.api.clone();
        match selected {
            Some(current) => {
                let update = DepartmentUpdate::diff(current, &wanted);
                if update.is_empty() {
                    tracing::debug!(id = current.id, "no changes");
                    return Ok(());
                }
                self.call(cancel, api.update_department(&current.id, &update))
                    .await
            }
            None => self.call(cancel, api.create_department(&wanted)).await,
        }
    }

    // back to the table and a fresh page on success, error kept otherwise
    async fn finish(
        &mut self,
        res: Result<(), ViewError>,
        cancel: &CancellationToken,
    ) -> Result<(), ViewError> {
        match res {
            Ok(()) => {
                self.mode = Mode::Listing;
                self.load(cancel).await
            }
            Err(ViewError::Cancelled()) => Err(ViewError::Cancelled()),
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn call<F>(&mut self, cancel: &CancellationToken, fut: F) -> Result<(), ViewError>
    where
        F: std::future::Future<Output = Result<(), crate::model::error::ApiError>>,
    {
        self.loading = true;
        let res = guarded(cancel, fut).await;
        self.loading = false;
        Ok(res.ok_or(ViewError::Cancelled())??)
    }

    async fn fetch_page(&mut self, cancel: &CancellationToken) -> Result<(), ViewError> {
        self.loading = true;
        let res = guarded(cancel, self.api.get_departments(self.current_page)).await;
        self.loading = false;
        match res {
            None => Err(ViewError::Cancelled()),
            Some(Ok(page)) => {
                self.departments = page.items;
                self.total = page.total;
                self.error = None;
                Ok(())
            }
            Some(Err(e)) => {
                tracing::warn!(page = self.current_page, err = %e, "can't load departments");
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }
}
