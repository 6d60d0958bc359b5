//! Login and registration form payloads, validated before any storage access.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

pub const MSG_LOGIN_MISSING: &str = "Enter email and password";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_REGISTER_MISSING: &str = "Complete all fields";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_EMAIL_TAKEN: &str = "Email already registered";

/// `POST /login` body. Absent fields deserialize as empty.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    /// Trim the email, then check both fields are present.
    pub fn check(mut self) -> Result<Self, &'static str> {
        self.email = self.email.trim().to_string();
        self.validate().map_err(|_| MSG_LOGIN_MISSING)?;
        Ok(self)
    }
}

/// `POST /register` body.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1), must_match(other = "password"))]
    pub password_confirm: String,
}

impl RegisterForm {
    /// Missing fields are reported before a password mismatch.
    pub fn check(mut self) -> Result<Self, &'static str> {
        self.email = self.email.trim().to_string();
        match self.validate() {
            Ok(()) => Ok(self),
            Err(errors) if has_code(&errors, "length") => Err(MSG_REGISTER_MISSING),
            Err(_) => Err(MSG_PASSWORD_MISMATCH),
        }
    }
}

fn has_code(errors: &ValidationErrors, code: &str) -> bool {
    errors
        .field_errors()
        .values()
        .any(|list| list.iter().any(|e| e.code == code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str, confirm: &str) -> Result<RegisterForm, &'static str> {
        RegisterForm {
            email: email.to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
        .check()
    }

    #[test]
    fn login_trims_email() {
        let form = LoginForm {
            email: "  alice@x.com \n".to_string(),
            password: " pw ".to_string(),
        }
        .check()
        .unwrap();
        assert_eq!(form.email, "alice@x.com");
        assert_eq!(form.password, " pw ");
    }

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(LoginForm::default().check().unwrap_err(), MSG_LOGIN_MISSING);
        let whitespace_email = LoginForm {
            email: "   ".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(whitespace_email.check().unwrap_err(), MSG_LOGIN_MISSING);
    }

    #[test]
    fn register_accepts_matching_passwords() {
        let form = register(" alice@x.com ", "Secret123", "Secret123").unwrap();
        assert_eq!(form.email, "alice@x.com");
    }

    #[test]
    fn register_rejects_mismatch() {
        assert_eq!(register("alice@x.com", "A", "B").unwrap_err(), MSG_PASSWORD_MISMATCH);
        assert_eq!(register("alice@x.com", "abc", "abc ").unwrap_err(), MSG_PASSWORD_MISMATCH);
    }

    #[test]
    fn register_reports_missing_before_mismatch() {
        assert_eq!(register("alice@x.com", "A", "").unwrap_err(), MSG_REGISTER_MISSING);
        assert_eq!(register("", "A", "B").unwrap_err(), MSG_REGISTER_MISSING);
        assert_eq!(register("  ", "A", "A").unwrap_err(), MSG_REGISTER_MISSING);
    }
}
