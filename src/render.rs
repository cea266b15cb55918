//! Plain text rendering of view state for the terminal front end.

use std::fmt::Write;

use crate::model::user::User;
use crate::view::department::{DepartmentView, Mode};
use crate::view::profile::ProfileView;
use crate::view::queries::{QueriesView, IT_REPORT_TITLE, SALES_REPORT_TITLE};

const LOADING: &str = "Loading...";

/// Salary with thousands separators, `$12,500` or `$1,234.5`.
pub fn money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let mut digits = (cents / 100).to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = format!(",{}{}", tail, grouped);
    }
    grouped = format!("{}{}", digits, grouped);
    let fraction = cents % 100;
    if fraction > 0 {
        let fraction = format!("{:02}", fraction);
        grouped.push('.');
        grouped.push_str(fraction.trim_end_matches('0'));
    }
    format!("{}${}", sign, grouped)
}

fn table(out: &mut String, header: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };
    let _ = writeln!(out, "{}", line(header.to_vec()));
    let _ = writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    for row in rows {
        let _ = writeln!(out, "{}", line(row.iter().map(String::as_str).collect()));
    }
}

fn error_panel(message: &str) -> String {
    format!("Error\n{}\n", message)
}

pub fn departments(view: &DepartmentView) -> String {
    let mut out = String::from("Department Management\n\n");
    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {}\n", error);
    }
    if view.loading {
        let _ = writeln!(out, "{}", LOADING);
    }
    let rows: Vec<Vec<String>> = view
        .departments
        .iter()
        .map(|d| {
            vec![
                d.department_name.clone(),
                d.category_name.to_string(),
                d.location.clone(),
                money(d.salary),
                d.id.clone(),
            ]
        })
        .collect();
    table(
        &mut out,
        &["Department Name", "Category", "Location", "Salary", "ID"],
        &rows,
    );
    let pages: Vec<String> = view
        .page_buttons()
        .into_iter()
        .map(|p| {
            if p == view.current_page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    if !pages.is_empty() {
        let _ = writeln!(out, "\nPages: {}", pages.join(" "));
    }
    match &view.mode {
        Mode::Listing => {}
        Mode::Editing { selected, .. } => {
            let _ = writeln!(
                out,
                "\n{}",
                if selected.is_some() {
                    "Edit Department"
                } else {
                    "Add Department"
                }
            );
        }
        Mode::Assigning { department, .. } => {
            let _ = writeln!(out, "\nAssign Employees to {}", department.department_name);
        }
        Mode::Deleting { department } => {
            let _ = writeln!(
                out,
                "\nAre you sure you want to delete {}?",
                department.department_name
            );
        }
    }
    out
}

pub fn profile(view: &ProfileView) -> String {
    if view.loading {
        return format!("{}\n", LOADING);
    }
    if let Some(error) = &view.error {
        return error_panel(error);
    }
    let mut out = String::from("Employee Profile\n\nPersonal Information\n");
    if let Some(p) = &view.profile {
        let _ = writeln!(out, "  Name:  {}", p.full_name());
        let _ = writeln!(out, "  Email: {}", p.email);
        let _ = writeln!(out, "  Role:  {}", p.role);
    }
    let _ = writeln!(out, "\nDepartment Information");
    match &view.department {
        Some(d) => {
            let _ = writeln!(out, "  Department Name: {}", d.department_name);
            let _ = writeln!(out, "  Location:        {}", d.location);
            let _ = writeln!(out, "  Category:        {}", d.category_name);
        }
        None => {
            let _ = writeln!(out, "  Not assigned");
        }
    }
    out
}

fn employees(out: &mut String, title: &str, employees: &[User]) {
    let _ = writeln!(out, "\n{}", title);
    if employees.is_empty() {
        let _ = writeln!(out, "No employees found.");
        return;
    }
    let rows: Vec<Vec<String>> = employees
        .iter()
        .map(|e| {
            vec![
                e.full_name(),
                e.email.clone(),
                e.gender.map(|g| g.to_string()).unwrap_or_default(),
                e.role.to_string(),
            ]
        })
        .collect();
    table(out, &["Name", "Email", "Gender", "Role"], &rows);
}

pub fn queries(view: &QueriesView) -> String {
    if view.loading {
        return format!("{}\n", LOADING);
    }
    if let Some(error) = &view.error {
        return error_panel(error);
    }
    let mut out = String::from("Employee Reports\n");
    employees(&mut out, IT_REPORT_TITLE, &view.it_employees);
    employees(&mut out, SALES_REPORT_TITLE, &view.sales_employees);
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::view::fake::{department, FakeApi};
    use test_case::test_case;

    #[test_case(0.0, "$0"; "zero")]
    #[test_case(999.0, "$999"; "small")]
    #[test_case(12500.0, "$12,500"; "thousands")]
    #[test_case(1234567.0, "$1,234,567"; "millions")]
    #[test_case(1234.5, "$1,234.5"; "fraction")]
    #[test_case(-1500.0, "-$1,500"; "negative")]
    #[test_case(5.999, "$6"; "rounded")]
    #[test_case(10.05, "$10.05"; "cents")]
    fn test_money(value: f64, expected: &str) {
        assert_eq!(money(value), expected);
    }

    #[test]
    fn test_table() {
        let mut out = String::new();
        table(
            &mut out,
            &["A", "Bee"],
            &[vec!["long".to_string(), "x".to_string()]],
        );
        assert_eq!(out, "A    | Bee\n-----+----\nlong | x\n");
    }

    #[test]
    fn test_departments() {
        let mut view = DepartmentView::new(Arc::new(FakeApi::new()));
        view.departments = vec![department("d1", "Core")];
        view.total = 7;
        view.current_page = 2;
        view.request_delete(&department("d1", "Core"));

        let out = departments(&view);

        assert!(out.contains("Core"));
        assert!(out.contains("$100"));
        assert!(out.contains("Pages: 1 [2]"));
        assert!(out.contains("Are you sure you want to delete Core?"));
    }

    #[test]
    fn test_queries_empty() {
        let mut view = QueriesView::new(Arc::new(FakeApi::new()));
        view.loading = false;

        let out = queries(&view);

        assert_eq!(out.matches("No employees found.").count(), 2);
    }

    #[test]
    fn test_profile_error_panel() {
        let mut view = ProfileView::new(Arc::new(FakeApi::new()));
        assert_eq!(profile(&view), "Loading...\n");
        view.loading = false;
        view.error = Some("boom".to_string());
        assert_eq!(profile(&view), "Error\nboom\n");
    }
}
