//! Employee domain types and creation-input validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An employee as exposed by this service.
///
/// The upstream API names fields `employee_*` on the wire; the aliases
/// accept that shape on deserialization while this service serializes
/// clean names for its own consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,

    #[serde(alias = "employee_name")]
    pub name: Option<String>,

    #[serde(alias = "employee_salary")]
    pub salary: Option<i64>,

    #[serde(alias = "employee_age")]
    pub age: Option<i64>,

    #[serde(alias = "employee_title")]
    pub title: Option<String>,

    #[serde(alias = "employee_email")]
    pub email: Option<String>,
}

/// Input for creating a new employee.
///
/// All fields are optional at the deserialization boundary so that
/// [`CreateEmployeeInput::validate`] can report every missing or invalid
/// field together, rather than failing on the first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub age: Option<i64>,
    pub title: Option<String>,
}

/// Age bounds accepted by the upstream provider.
const MIN_AGE: i64 = 16;
const MAX_AGE: i64 = 75;

impl CreateEmployeeInput {
    /// Validate the input, collecting every violation.
    pub fn validate(&self) -> Result<(), Vec<InputError>> {
        let mut errors = Vec::new();

        match &self.name {
            Some(name) if !name.trim().is_empty() => {}
            _ => errors.push(InputError::new("name", "Name is required")),
        }

        match self.salary {
            None => errors.push(InputError::new("salary", "Salary is required")),
            Some(salary) if salary <= 0 => {
                errors.push(InputError::new("salary", "Salary must be positive"))
            }
            Some(_) => {}
        }

        match self.age {
            None => errors.push(InputError::new("age", "Age is required")),
            Some(age) if age < MIN_AGE => {
                errors.push(InputError::new("age", "Age must be at least 16"))
            }
            Some(age) if age > MAX_AGE => {
                errors.push(InputError::new("age", "Age must be at most 75"))
            }
            Some(_) => {}
        }

        match &self.title {
            Some(title) if !title.trim().is_empty() => {}
            _ => errors.push(InputError::new("title", "Title is required")),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A single violation in creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    pub field: String,
    pub message: String,
}

impl InputError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Request body the upstream API expects for deletion.
///
/// The upstream addresses deletions by name, not id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEmployeeRequest {
    pub name: String,
}
