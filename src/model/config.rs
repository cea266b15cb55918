use std::time::Duration;

use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEPARTMENTS_PATH: &str = "/department/departments";
// Older server builds expose updates without the /department prefix
pub const LEGACY_UPDATE_PREFIX: &str = "/departments";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub update_prefix: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("wrong server uri '{}': {}", base_url, e))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow::anyhow!("server uri can't be a base: {}", base_url));
        }
        Ok(ClientConfig {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            update_prefix: DEPARTMENTS_PATH.to_string(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_update_prefix(mut self, prefix: &str) -> Self {
        self.update_prefix = format!("/{}", prefix.trim_matches('/'));
        self
    }

    /// Joins an absolute API path onto the base url, keeping any base path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
