use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::model::auth::RegisterUser;
use crate::model::user::{Gender, Role};
use crate::router::Route;
use crate::utils::secret_str::SecretString;
use crate::HrApi;

use super::{guarded, required, ViewError};

#[derive(Clone)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub gender: Gender,
    pub hobbies: Vec<String>,
    pub new_hobby: String,
    pub role: Role,
}

impl Default for SignupForm {
    fn default() -> Self {
        SignupForm {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: "".into(),
            gender: Gender::Male,
            hobbies: Vec::new(),
            new_hobby: String::new(),
            role: Role::Employee,
        }
    }
}

impl SignupForm {
    /// Moves the pending hobby into the list, blanks are dropped.
    pub fn add_hobby(&mut self) {
        let hobby = self.new_hobby.trim();
        if !hobby.is_empty() {
            self.hobbies.push(hobby.to_string());
        }
        self.new_hobby.clear();
    }

    pub fn remove_hobby(&mut self, hobby: &str) {
        self.hobbies.retain(|h| h != hobby);
    }

    fn validate(&self) -> Result<RegisterUser, ViewError> {
        required(&self.first_name, "First name")?;
        required(&self.last_name, "Last name")?;
        required(&self.email, "Email")?;
        required(self.password.reveal_secret(), "Password")?;
        if let Role::Unknown(role) = &self.role {
            return Err(ViewError::Validation(format!("Unsupported role: {}", role)));
        }
        Ok(RegisterUser {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            gender: self.gender,
            hobbies: self.hobbies.clone(),
            role: self.role.clone(),
        })
    }
}

pub struct SignupView {
    api: Arc<dyn HrApi + Send + Sync>,
    pub form: SignupForm,
    pub error: Option<String>,
    pub loading: bool,
}

impl SignupView {
    pub fn new(api: Arc<dyn HrApi + Send + Sync>) -> Self {
        SignupView {
            api,
            form: SignupForm::default(),
            error: None,
            loading: false,
        }
    }

    /// Registers the account; on success the user goes on to log in.
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
        let data = self.form.validate()?;
        self.loading = true;
        let res = guarded(cancel, self.api.register_user(&data)).await;
        self.loading = false;
        let message = res.ok_or(ViewError::Cancelled())??;
        tracing::info!(email = data.email, reply = message, "registered");
        Ok(Route::Login)
    }
}
