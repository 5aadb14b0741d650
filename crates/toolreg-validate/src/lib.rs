#![forbid(unsafe_code)]

mod adapters;
mod governance;
mod schema;

use std::fmt::{Display, Formatter};

pub const CRATE_NAME: &str = "toolreg-validate";

pub use adapters::{load_category_tools, load_raw_category_records, load_taxonomy_store};
pub use governance::{validate_category, validate_registry, ValidationReport};
pub use schema::{check_tool_shape, decode_tool};

/// Fatal validator error: unreadable taxonomy, malformed config. Distinct
/// from a [`Violation`], which is an accumulated finding about the data.
#[derive(Debug)]
pub struct ValidateError(pub String);

impl Display for ValidateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidateError {}

/// One validation finding. `tool` is blank for file-level findings (sort
/// order, population); `category` is blank for registry-level findings
/// (cross-category duplicate IDs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub category: String,
    pub tool: String,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn for_tool(category: &str, tool: &str, message: String) -> Self {
        Self {
            category: category.to_string(),
            tool: tool.to_string(),
            message,
        }
    }

    #[must_use]
    pub fn for_file(category: &str, message: String) -> Self {
        Self {
            category: category.to_string(),
            tool: String::new(),
            message,
        }
    }

    #[must_use]
    pub fn for_registry(message: String) -> Self {
        Self {
            category: String::new(),
            tool: String::new(),
            message,
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.category.is_empty() {
            write!(f, "registry: {}", self.message)
        } else if self.tool.is_empty() {
            write!(f, "{}: {}", self.category, self.message)
        } else {
            write!(f, "{}/{}: {}", self.category, self.tool, self.message)
        }
    }
}
