use serde::{Deserialize, Serialize};

use crate::utils::secret_str::SecretString;

use super::user::Role;

// Persisted between runs, see store::file
#[derive(Serialize, Deserialize, Clone)]
pub struct SessionData {
    pub token: SecretString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub logged_in_at: i64, // Unix timestamp
}

impl SessionData {
    pub fn new(token: SecretString, role: Option<Role>, now: i64) -> Self {
        SessionData {
            token,
            role,
            logged_in_at: now,
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token.reveal_secret())
    }
}
