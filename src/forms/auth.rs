use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{Email, TypeConstraintError, UserName};
use crate::models::auth::{LoginDto, RegisterDto};

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginPayload {
    pub email: Email,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Login form validation failed: {0}")]
    Validation(String),
    #[error("Login form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for LoginFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for LoginFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: Email::new(value.email)?,
            password: value.password,
        })
    }
}

impl From<&LoginPayload> for LoginDto {
    fn from(payload: &LoginPayload) -> Self {
        Self {
            email: payload.email.as_str().to_string(),
            password: payload.password.clone(),
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterPayload {
    pub email: Email,
    pub password: String,
    pub name: UserName,
}

#[derive(Debug, Error)]
pub enum RegisterFormError {
    #[error("Registration form validation failed: {0}")]
    Validation(String),
    #[error("Registration form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for RegisterFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RegisterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<RegisterForm> for RegisterPayload {
    type Error = RegisterFormError;

    fn try_from(value: RegisterForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: Email::new(value.email)?,
            password: value.password,
            name: UserName::new(value.name)?,
        })
    }
}

impl From<&RegisterPayload> for RegisterDto {
    fn from(payload: &RegisterPayload) -> Self {
        Self {
            email: payload.email.as_str().to_string(),
            password: payload.password.clone(),
            name: payload.name.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_login() {
        let payload = LoginPayload::try_from(LoginForm {
            email: "ann@example.com".into(),
            password: "secret".into(),
        })
        .unwrap();
        assert_eq!(payload.email, "ann@example.com");
    }

    #[test]
    fn rejects_invalid_email() {
        let err = LoginPayload::try_from(LoginForm {
            email: "not-an-email".into(),
            password: "secret".into(),
        })
        .unwrap_err();
        assert!(matches!(err, LoginFormError::Validation(_)));
    }

    #[test]
    fn registration_requires_name() {
        let err = RegisterPayload::try_from(RegisterForm {
            email: "ann@example.com".into(),
            password: "secret".into(),
            name: "".into(),
        })
        .unwrap_err();
        assert!(matches!(err, RegisterFormError::Validation(_)));
    }

    #[test]
    fn blank_name_fails_type_constraint() {
        let err = RegisterPayload::try_from(RegisterForm {
            email: "ann@example.com".into(),
            password: "secret".into(),
            name: "   ".into(),
        })
        .unwrap_err();
        assert!(matches!(err, RegisterFormError::TypeConstraint(_)));
    }
}
