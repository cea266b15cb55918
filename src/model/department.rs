use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "IT")]
    It,
    Sales,
    Product,
    Marketing,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Hr,
        Category::It,
        Category::Sales,
        Category::Product,
        Category::Marketing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hr => "HR",
            Category::It => "IT",
            Category::Sales => "Sales",
            Category::Product => "Product",
            Category::Marketing => "Marketing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Populated employee without role or profile details.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Employees of a department come back as bare ids, full user records or
/// summaries, depending on the endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum EmployeeRef {
    Id(String),
    Record(Box<User>),
    Summary(EmployeeSummary),
}

impl EmployeeRef {
    pub fn id(&self) -> &str {
        match self {
            EmployeeRef::Id(id) => id,
            EmployeeRef::Record(user) => &user.id,
            EmployeeRef::Summary(employee) => &employee.id,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: String,
    pub department_name: String,
    pub category_name: Category,
    pub location: String,
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<EmployeeRef>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    pub department_name: String,
    pub category_name: Category,
    pub location: String,
    pub salary: f64,
}

/// Partial update, only the present fields go on the wire.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

impl DepartmentUpdate {
    pub fn diff(current: &Department, wanted: &NewDepartment) -> Self {
        DepartmentUpdate {
            department_name: (current.department_name.trim() != wanted.department_name.trim())
                .then(|| wanted.department_name.trim().to_string()),
            category_name: (current.category_name != wanted.category_name)
                .then_some(wanted.category_name),
            location: (current.location.trim() != wanted.location.trim())
                .then(|| wanted.location.trim().to_string()),
            salary: (current.salary != wanted.salary).then_some(wanted.salary),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.department_name.is_none()
            && self.category_name.is_none()
            && self.location.is_none()
            && self.salary.is_none()
    }
}

impl From<&Department> for NewDepartment {
    fn from(d: &Department) -> Self {
        NewDepartment {
            department_name: d.department_name.clone(),
            category_name: d.category_name,
            location: d.location.clone(),
            salary: d.salary,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignEmployees<'a> {
    pub employee_ids: &'a [String],
}
