//! Employee domain operations.
//!
//! Every upstream-touching operation runs under the retry executor; the
//! derived reads (search, highest salary, top earners) post-process the
//! list from a single retried fetch-all and add no retries of their own.

use crate::config::UpstreamConfig;
use crate::employees::rankings;
use crate::employees::types::{CreateEmployeeInput, Employee};
use crate::lifecycle::ShutdownListener;
use crate::upstream::{EmployeeApi, RetryExecutor, RetryPolicy, UpstreamError};

/// Stateless pass-through service over the upstream employee API.
///
/// Holds only the immutable retry policy and the HTTP client; concurrent
/// requests share it freely and never serialize against each other.
pub struct EmployeeService {
    api: EmployeeApi,
    retry: RetryExecutor,
}

impl EmployeeService {
    pub fn new(config: &UpstreamConfig, shutdown: ShutdownListener) -> Result<Self, reqwest::Error> {
        let policy = RetryPolicy::new(config.max_attempts, config.retry_delay());
        Ok(Self {
            api: EmployeeApi::new(config)?,
            retry: RetryExecutor::new(policy, shutdown),
        })
    }

    /// All employees known upstream.
    pub async fn get_all_employees(&self) -> Result<Vec<Employee>, UpstreamError> {
        tracing::info!("Fetching all employees from upstream");
        self.retry.run("fetch_all", || self.api.fetch_all()).await
    }

    /// Employees whose name contains `fragment`, case-insensitively.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>, UpstreamError> {
        tracing::info!(fragment, "Searching employees by name");
        let employees = self.get_all_employees().await?;
        let matches = rankings::filter_by_name(employees, fragment);
        tracing::debug!(count = matches.len(), "Employees matched search");
        Ok(matches)
    }

    /// A single employee by id.
    pub async fn get_employee_by_id(&self, id: &str) -> Result<Employee, UpstreamError> {
        tracing::info!(id, "Fetching employee by ID");
        self.retry.run("fetch_by_id", || self.api.fetch_by_id(id)).await
    }

    /// The highest salary among all employees; 0 when there are none.
    pub async fn highest_salary(&self) -> Result<i64, UpstreamError> {
        tracing::info!("Finding highest salary among all employees");
        let employees = self.get_all_employees().await?;
        Ok(rankings::highest_salary(&employees))
    }

    /// Names of the top ten earners, highest salary first.
    pub async fn top_earner_names(&self) -> Result<Vec<String>, UpstreamError> {
        tracing::info!("Finding top earning employees");
        let employees = self.get_all_employees().await?;
        Ok(rankings::top_earner_names(employees))
    }

    /// Create a new employee upstream. Input is validated by the caller.
    pub async fn create_employee(
        &self,
        input: &CreateEmployeeInput,
    ) -> Result<Employee, UpstreamError> {
        tracing::info!(name = input.name.as_deref().unwrap_or(""), "Creating employee");
        let created = self.retry.run("create", || self.api.create(input)).await?;
        tracing::info!(id = %created.id, "Created employee");
        Ok(created)
    }

    /// Delete an employee by id, returning the deleted employee's name.
    ///
    /// The upstream deletes by name, so the id is first resolved with a
    /// (retried) fetch; a missing employee surfaces as not-found before
    /// any delete is issued.
    pub async fn delete_employee_by_id(&self, id: &str) -> Result<String, UpstreamError> {
        tracing::info!(id, "Deleting employee");
        let employee = self.get_employee_by_id(id).await?;
        let name = employee.name.ok_or_else(|| {
            UpstreamError::OperationFailed(format!(
                "Employee {id} has no name to address the deletion"
            ))
        })?;

        self.retry
            .run("delete", || self.api.delete_by_name(&name))
            .await?;
        tracing::info!(name = %name, "Deleted employee");
        Ok(name)
    }
}
