use serde::{Deserialize, Serialize};

/// A user-assignable classification label and its display color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductivityType {
    #[serde(rename = "type")]
    pub type_str: String,
    pub color: String,
}
