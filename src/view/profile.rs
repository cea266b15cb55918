use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::model::department::Department;
use crate::model::user::User;
use crate::HrApi;

use super::{guarded, ViewError, LOAD_ERROR};

/// Self-service page of the logged in employee.
pub struct ProfileView {
    api: Arc<dyn HrApi + Send + Sync>,
    pub profile: Option<User>,
    pub department: Option<Department>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProfileView {
    pub fn new(api: Arc<dyn HrApi + Send + Sync>) -> Self {
        ProfileView {
            api,
            profile: None,
            department: None,
            loading: true,
            error: None,
        }
    }

    pub async fn load(&mut self, cancel: &CancellationToken) -> Result<(), ViewError> {
        self.loading = true;
        let api = self.api.clone();
        let res = guarded(cancel, async {
            tokio::try_join!(api.fetch_employee_profile(), api.fetch_employee_department())
        })
        .await;
        self.loading = false;
        match res.ok_or(ViewError::Cancelled())? {
            Ok((profile, department)) => {
                self.profile = Some(profile);
                self.department = department;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(err = %e, "can't load profile");
                self.error = Some(LOAD_ERROR.to_string());
                Err(e.into())
            }
        }
    }
}
