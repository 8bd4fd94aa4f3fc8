//! Login form validation.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    #[error("Username is a required field")]
    UsernameRequired,

    #[error("Password is a required field")]
    PasswordRequired,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, LoginError> {
        if self.username.trim().is_empty() {
            return Err(LoginError::UsernameRequired);
        }
        if self.password.is_empty() {
            return Err(LoginError::PasswordRequired);
        }
        Ok(LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

impl core::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_required() {
        let form = LoginForm {
            username: "  ".into(),
            password: "secret".into(),
        };
        assert_eq!(form.validate(), Err(LoginError::UsernameRequired));
    }

    #[test]
    fn password_is_required() {
        let form = LoginForm {
            username: "criouser".into(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(LoginError::PasswordRequired));
    }

    #[test]
    fn valid_form_trims_username() {
        let form = LoginForm {
            username: " criouser ".into(),
            password: "learnwithcrio".into(),
        };
        let request = form.validate().unwrap();
        assert_eq!(request.username, "criouser");
        assert_eq!(request.password, "learnwithcrio");
    }
}
