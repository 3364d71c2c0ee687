use serde::{Deserialize, Serialize};

/// The four arithmetic categories a challenge can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Addition problems.
    Addition,
    /// Subtraction problems.
    Subtraction,
    /// Multiplication tables.
    Multiplication,
    /// Division, exact or with remainder.
    Division,
}

impl Category {
    /// Parse a category from free text. Unknown input falls back to addition.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "subtraction" => Self::Subtraction,
            "multiplication" => Self::Multiplication,
            "division" => Self::Division,
            _ => Self::Addition,
        }
    }

    /// The lowercase display name, matching the serde representation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
