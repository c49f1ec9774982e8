//! Auth Form Model
//!
//! Raw input of the login/register form and its conversion to requests.

use crate::api::{LoginRequest, RegisterRequest};
use crate::state::AuthMode;

/// Form fields as typed, age still text
#[derive(Clone, Debug, PartialEq)]
pub struct AuthFormData {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: String,
    pub gender: String,
}

impl Default for AuthFormData {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            name: String::new(),
            age: String::new(),
            gender: "male".to_string(),
        }
    }
}

/// What to send for the current mode
#[derive(Clone, Debug, PartialEq)]
pub enum AuthSubmission {
    Login(LoginRequest),
    Register(RegisterRequest),
}

impl AuthFormData {
    /// Build the request. Login ignores the register-only fields.
    pub fn submission(&self, mode: AuthMode) -> Result<AuthSubmission, String> {
        match mode {
            AuthMode::Login => Ok(AuthSubmission::Login(LoginRequest {
                email: self.email.trim().to_string(),
                password: self.password.clone(),
            })),
            AuthMode::Register => {
                let age = self
                    .age
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| "Please enter your age as a number".to_string())?;

                Ok(AuthSubmission::Register(RegisterRequest {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                    name: self.name.trim().to_string(),
                    age,
                    gender: self.gender.clone(),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> AuthFormData {
        AuthFormData {
            email: " kim@example.com ".to_string(),
            password: "pw".to_string(),
            name: "Kim".to_string(),
            age: "29".to_string(),
            gender: "female".to_string(),
        }
    }

    #[test]
    fn test_login_ignores_register_fields() {
        let form = AuthFormData {
            age: "not a number".to_string(),
            ..filled()
        };

        match form.submission(AuthMode::Login).unwrap() {
            AuthSubmission::Login(req) => {
                assert_eq!(req.email, "kim@example.com");
                assert_eq!(req.password, "pw");
            }
            other => panic!("expected login, got {:?}", other),
        }
    }

    #[test]
    fn test_register_parses_age() {
        match filled().submission(AuthMode::Register).unwrap() {
            AuthSubmission::Register(req) => {
                assert_eq!(req.age, 29);
                assert_eq!(req.gender, "female");
            }
            other => panic!("expected register, got {:?}", other),
        }
    }

    #[test]
    fn test_register_rejects_bad_age() {
        let form = AuthFormData {
            age: "abc".to_string(),
            ..filled()
        };
        assert!(form.submission(AuthMode::Register).is_err());
    }

    #[test]
    fn test_default_gender_is_male() {
        assert_eq!(AuthFormData::default().gender, "male");
    }
}
