//! Department Model

use serde::{Deserialize, Serialize};

/// Department account that complaints can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub email: String,
    pub username: Option<String>,
}

impl Department {
    pub fn label(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}
