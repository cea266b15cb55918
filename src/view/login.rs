use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::model::auth::Credentials;
use crate::model::data::SessionData;
use crate::router::Route;
use crate::utils::secret_str::SecretString;
use crate::{HrApi, SessionStore};

use super::{guarded, required, ViewError};

#[derive(Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl Default for LoginForm {
    fn default() -> Self {
        LoginForm {
            email: String::new(),
            password: "".into(),
        }
    }
}

impl LoginForm {
    fn validate(&self) -> Result<Credentials, ViewError> {
        required(&self.email, "Email")?;
        required(self.password.reveal_secret(), "Password")?;
        Ok(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

pub struct LoginView {
    api: Arc<dyn HrApi + Send + Sync>,
    session: Arc<dyn SessionStore + Send + Sync>,
    pub form: LoginForm,
    pub error: Option<String>,
    pub loading: bool,
}

impl LoginView {
    pub fn new(
        api: Arc<dyn HrApi + Send + Sync>,
        session: Arc<dyn SessionStore + Send + Sync>,
    ) -> Self {
        LoginView {
            api,
            session,
            form: LoginForm::default(),
            error: None,
            loading: false,
        }
    }

    /// Logs in, keeps the credential and returns the page for the user's role.
    pub async fn submit(&mut self, cancel: &CancellationToken) -> Result<Route, ViewError> {
        self.error = None;
        let res = self.submit_int(cancel).await;
        if let Err(e) = &res {
            if !matches!(e, ViewError::Cancelled()) {
                self.error = Some(e.to_string());
            }
        }
        res
    }

    async fn submit_int(&mut self, cancel: &CancellationToken) -> Result<Route, ViewError> {
        let credentials = self.form.validate()?;
        self.loading = true;
        let res = guarded(cancel, self.api.login_user(&credentials)).await;
        self.loading = false;
        let res = res.ok_or(ViewError::Cancelled())??;
        let role = res.user.role.clone();
        let route = match Route::for_role(&role) {
            Some(route) => route,
            None => {
                tracing::error!(user = res.user.id, role = %role, "no page for role");
                return Err(ViewError::UnhandledRole(role));
            }
        };
        self.session
            .add(SessionData::new(
                res.token,
                Some(role),
                Utc::now().timestamp_millis(),
            ))
            .await?;
        tracing::info!(user = res.user.id, route = %route, "login successful");
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::error::ApiError;
    use crate::model::user::Role;
    use crate::store::memory::InMemorySessionStore;
    use crate::view::fake::FakeApi;
    use test_case::test_case;

    fn view(api: Arc<FakeApi>, session: Arc<InMemorySessionStore>) -> LoginView {
        let mut res = LoginView::new(api, session);
        res.form.email = "ann@example.com".to_string();
        res.form.password = "secret".into();
        res
    }

    #[test_case(Role::Manager, Route::DepartmentManagement; "manager")]
    #[test_case(Role::Employee, Route::EmployeeProfile; "employee")]
    #[tokio::test]
    async fn test_login_routes_by_role(role: Role, expected: Route) {
        let api = Arc::new(FakeApi::new());
        *api.role.lock().unwrap() = role;
        let session = Arc::new(InMemorySessionStore::new());
        let mut view = view(api, session.clone());

        let route = view.submit(&CancellationToken::new()).await.unwrap();

        assert_eq!(route, expected);
        assert_eq!(session.get().await.unwrap().token.reveal_secret(), "fake-token");
        assert!(view.error.is_none());
        assert!(!view.loading);
    }

    #[tokio::test]
    async fn test_login_unknown_role() {
        let api = Arc::new(FakeApi::new());
        *api.role.lock().unwrap() = Role::Unknown("admin".to_string());
        let session = Arc::new(InMemorySessionStore::new());
        let mut view = view(api, session.clone());

        let res = view.submit(&CancellationToken::new()).await;

        assert!(matches!(res, Err(ViewError::UnhandledRole(Role::Unknown(_)))));
        assert_eq!(view.error.as_deref(), Some("Unhandled role: 'admin'"));
        assert!(session.get().await.is_err());
    }

    #[tokio::test]
    async fn test_login_wrong_credentials() {
        let api = Arc::new(FakeApi::new());
        api.fail_with(ApiError::Unauthorized("Invalid email or password".to_string()));
        let session = Arc::new(InMemorySessionStore::new());
        let mut view = view(api, session.clone());

        let res = view.submit(&CancellationToken::new()).await;

        assert!(matches!(res, Err(ViewError::Api(ApiError::Unauthorized(_)))));
        assert_eq!(view.error.as_deref(), Some("Invalid email or password"));
        assert!(!view.loading);
        assert!(session.get().await.is_err());
    }

    #[tokio::test]
    async fn test_login_required_fields() {
        let api = Arc::new(FakeApi::new());
        let mut view = view(api.clone(), Arc::new(InMemorySessionStore::new()));
        view.form.password = "".into();

        let res = view.submit(&CancellationToken::new()).await;

        assert!(matches!(res, Err(ViewError::Validation(_))));
        assert_eq!(view.error.as_deref(), Some("Password is required"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_login_cancelled() {
        let api = Arc::new(FakeApi::new());
        let session = Arc::new(InMemorySessionStore::new());
        let mut view = view(api, session.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let res = view.submit(&cancel).await;

        assert!(matches!(res, Err(ViewError::Cancelled())));
        assert!(view.error.is_none());
        assert!(session.get().await.is_err());
    }
}
