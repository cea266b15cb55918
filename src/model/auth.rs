use serde::{Deserialize, Serialize};

use crate::utils::secret_str::SecretString;

use super::user::{Gender, Role, User};

#[derive(Serialize, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub gender: Gender,
    pub hobbies: Vec<String>,
    pub role: Role,
}

#[derive(Clone)]
pub struct LoginResult {
    pub token: SecretString,
    pub user: User,
}

// The login endpoint nests the record one level deeper in some versions.
#[derive(Deserialize)]
#[serde(untagged)]
enum LoginUser {
    Envelope { user: User },
    Plain(User),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    access_token: String,
    user: LoginUser,
}

impl From<LoginResponse> for LoginResult {
    fn from(res: LoginResponse) -> Self {
        let user = match res.user {
            LoginUser::Envelope { user } => user,
            LoginUser::Plain(user) => user,
        };
        LoginResult {
            token: res.access_token.into(),
            user,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn user_json(role: &str) -> serde_json::Value {
        serde_json::json!({
            "_id": "u1",
            "firstName": "Ann",
            "lastName": "Lee",
            "email": "ann@example.com",
            "role": role
        })
    }

    #[test_case(serde_json::json!({"accessToken": "t1", "user": {"user": user_json("manager")}}), Role::Manager; "envelope")]
    #[test_case(serde_json::json!({"accessToken": "t1", "user": user_json("employee")}), Role::Employee; "plain")]
    fn test_parse_login(input: serde_json::Value, role: Role) {
        let res: LoginResponse = serde_json::from_value(input).unwrap();
        let res: LoginResult = res.into();
        assert_eq!(res.token.reveal_secret(), "t1");
        assert_eq!(res.user.role, role);
    }

    #[test]
    fn test_register_body() {
        let data = RegisterUser {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            password: "secret".into(),
            gender: Gender::Female,
            hobbies: vec!["chess".to_string()],
            role: Role::Manager,
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({
                "firstName": "Ann",
                "lastName": "Lee",
                "email": "ann@example.com",
                "password": "secret",
                "gender": "female",
                "hobbies": ["chess"],
                "role": "manager"
            })
        );
    }
}
