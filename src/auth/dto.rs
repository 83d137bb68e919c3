use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
    /// Continuation target the UI wanted before being sent to login.
    pub next: Option<String>,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub redirect_to: String,
    pub user: PublicUser,
}

/// Request body for the account update.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub username: String,
    pub email: String,
}

/// Request body for requesting a password-reset mail.
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

/// Request body for performing the password reset.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub image_file: String,
}

impl From<crate::auth::repo::User> for PublicUser {
    fn from(u: crate::auth::repo::User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            image_file: u.image_file,
        }
    }
}

/// Plain user-facing message body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_defaults() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"pw"}"#).expect("parse");
        assert!(!req.remember);
        assert!(req.next.is_none());
    }

    #[test]
    fn public_user_serializes_expected_fields() {
        let user = PublicUser {
            id: 3,
            username: "alice".into(),
            email: "a@x.com".into(),
            image_file: "default.jpg".into(),
        };
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(json.contains("\"id\":3"));
        assert!(json.contains("default.jpg"));
    }
}
