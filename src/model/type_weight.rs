//! Type weights: the primary sort key of every value.

use serde::{Deserialize, Serialize};

use super::Value;

/// Ordered type category. Gaps between discriminants are intentional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TypeWeight {
    Null = 0,
    Bool = 1,
    Number = 2,
    String = 4,
    List = 8,
    Document = 16,
}

impl TypeWeight {
    /// Lists and documents.
    pub fn is_composite(self) -> bool {
        self >= TypeWeight::List
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeWeight::Null => "null",
            TypeWeight::Bool => "bool",
            TypeWeight::Number => "number",
            TypeWeight::String => "string",
            TypeWeight::List => "list",
            TypeWeight::Document => "document",
        }
    }
}

impl std::fmt::Display for TypeWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a value by its outer tag.
///
/// Non-finite numbers never reach this point: [`Value::number`] already
/// turned them into `Null`.
pub fn classify(v: &Value) -> TypeWeight {
    match v {
        Value::Null => TypeWeight::Null,
        Value::Bool(_) => TypeWeight::Bool,
        Value::Number(_) => TypeWeight::Number,
        Value::String(_) => TypeWeight::String,
        Value::List(_) => TypeWeight::List,
        Value::Document(_) => TypeWeight::Document,
    }
}
