use std::fmt;

use crate::model::user::Role;

/// Client side pages. Routing grants no access, the server authorizes every
/// call on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    EmployeeProfile,
    EmployeeQueries,
    DepartmentManagement,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Login,
        Route::Signup,
        Route::EmployeeProfile,
        Route::EmployeeQueries,
        Route::DepartmentManagement,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Signup => "/signup",
            Route::EmployeeProfile => "/employee-profile",
            Route::EmployeeQueries => "/employee-queries",
            Route::DepartmentManagement => "/department-management",
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Landing page after login. `None` for a role this client has no page for.
    pub fn for_role(role: &Role) -> Option<Route> {
        match role {
            Role::Manager => Some(Route::DepartmentManagement),
            Role::Employee => Some(Route::EmployeeProfile),
            Role::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/", Some(Route::Login); "root")]
    #[test_case("", Some(Route::Login); "empty")]
    #[test_case("/signup", Some(Route::Signup); "signup")]
    #[test_case("/signup/", Some(Route::Signup); "trailing slash")]
    #[test_case("/employee-profile?tab=1", Some(Route::EmployeeProfile); "query")]
    #[test_case("/employee-queries#it", Some(Route::EmployeeQueries); "fragment")]
    #[test_case("/department-management", Some(Route::DepartmentManagement); "departments")]
    #[test_case("/admin", None; "unknown")]
    #[test_case("/Signup", None; "case sensitive")]
    fn test_parse(input: &str, expected: Option<Route>) {
        assert_eq!(Route::parse(input), expected);
    }

    #[test_case(Role::Manager, Some(Route::DepartmentManagement); "manager")]
    #[test_case(Role::Employee, Some(Route::EmployeeProfile); "employee")]
    #[test_case(Role::Unknown("admin".to_string()), None; "unknown")]
    fn test_for_role(role: Role, expected: Option<Route>) {
        assert_eq!(Route::for_role(&role), expected);
    }

    #[test]
    fn test_paths_parse_back() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }
}
