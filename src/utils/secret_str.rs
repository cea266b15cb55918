use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Test if the SecretString does not reveal the secret
///
/// ```compile_fail
/// use hrdesk::utils::secret_str::SecretString;
/// let x: SecretString = "".into();
/// println!("{:?}", x);
/// ```
///
/// ```compile_fail
/// use hrdesk::utils::secret_str::SecretString;
/// let x: SecretString = "".into();
/// println!("{}", x);
/// ```

#[derive(Clone, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    /// ```
    /// use hrdesk::utils::secret_str::SecretString;
    ///
    /// let x: SecretString = "abc123".into();
    /// assert_eq!(x.reveal_secret(), "abc123");
    /// ```
    pub fn reveal_secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SecretString {
    fn from(secret: &str) -> Self {
        SecretString(secret.to_string())
    }
}

impl From<String> for SecretString {
    fn from(secret: String) -> Self {
        SecretString(secret)
    }
}

// the secret is written as is, keep it out of logs
impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretString)
    }
}
