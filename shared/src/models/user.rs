//! User Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::null_as_default;
use crate::error::UnknownValue;

/// Account role, decides which complaints the backend returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Citizen,
    Admin,
    Department,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Admin => "admin",
            Role::Department => "department",
        }
    }

    /// Complaint list endpoint scoped to this role
    pub fn complaints_path(&self) -> &'static str {
        match self {
            Role::Citizen => "complaints/my/",
            Role::Admin => "complaints/all/",
            Role::Department => "complaints/department/",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "citizen" => Ok(Role::Citizen),
            "admin" => Ok(Role::Admin),
            "department" => Ok(Role::Department),
            _ => Err(UnknownValue::new("role", s)),
        }
    }
}

/// Authenticated user identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
    pub avatar: Option<String>,
}

impl User {
    /// First non-empty of username, name, email.
    pub fn display_name(&self) -> &str {
        [&self.username, &self.name, &self.email]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|v| !v.trim().is_empty())
            .unwrap_or("User")
    }
}
