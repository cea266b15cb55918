use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::model::user::User;
use crate::HrApi;

use super::{guarded, ViewError, LOAD_ERROR};

pub const IT_REPORT_TITLE: &str = "IT Department Employees (Location starting with 'A')";
pub const SALES_REPORT_TITLE: &str = "Sales Department Employees (Sorted by Name)";

/// The two canned reports. Filtering and ordering happen on the server, the
/// lists are kept as received.
pub struct QueriesView {
    api: Arc<dyn HrApi + Send + Sync>,
    pub it_employees: Vec<User>,
    pub sales_employees: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl QueriesView {
    pub fn new(api: Arc<dyn HrApi + Send + Sync>) -> Self {
        QueriesView {
            api,
            it_employees: Vec::new(),
            sales_employees: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub async fn load(&mut self, cancel: &CancellationToken) -> Result<(), ViewError> {
        self.loading = true;
        let api = self.api.clone();
        let res = guarded(cancel, async {
            tokio::try_join!(
                api.fetch_it_employees_location_a(),
                api.fetch_sales_employees_sorted()
            )
        })
        .await;
        self.loading = false;
        match res.ok_or(ViewError::Cancelled())? {
            Ok((it, sales)) => {
                self.it_employees = it;
                self.sales_employees = sales;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(err = %e, "can't load reports");
                self.error = Some(LOAD_ERROR.to_string());
                Err(e.into())
            }
        }
    }
}
