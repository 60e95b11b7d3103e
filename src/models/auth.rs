use serde::{Deserialize, Serialize};

use crate::domain::auth::User;
use crate::domain::types::{BearerToken, Email, TypeConstraintError, UserName};

/// Body of the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

/// Body of the registration endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterDto {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Response of the login and refresh endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TokenDto {
    pub token: Option<String>,
}

/// Wire form of a user account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl TryFrom<TokenDto> for BearerToken {
    type Error = TypeConstraintError;

    fn try_from(dto: TokenDto) -> Result<Self, Self::Error> {
        BearerToken::new(dto.token.unwrap_or_default())
    }
}

impl TryFrom<UserDto> for User {
    type Error = TypeConstraintError;

    fn try_from(dto: UserDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.unwrap_or_default().try_into()?,
            name: dto.name.and_then(|n| UserName::new(n).ok()),
            email: dto.email.and_then(|e| Email::new(e).ok()),
            role: dto.role.filter(|r| !r.trim().is_empty()),
        })
    }
}
