use serde::{Deserialize, Serialize};

/// An AI behaviour profile. Built-in personas come from the server;
/// `is_custom` marks ones the user created there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Persona {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub is_custom: bool,
}
