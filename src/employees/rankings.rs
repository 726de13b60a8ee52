//! Derived read operations over an already-fetched employee list.
//!
//! These are pure and deterministic: they post-process the unwrapped
//! result of one retried fetch-all call and inherit its failure behavior.

use std::cmp::Reverse;

use crate::employees::types::Employee;

/// How many top earners a ranking returns at most.
pub const TOP_EARNER_COUNT: usize = 10;

/// Case-insensitive substring match over employee names.
///
/// Employees with no name never match. Source order is preserved.
pub fn filter_by_name(employees: Vec<Employee>, fragment: &str) -> Vec<Employee> {
    let needle = fragment.to_lowercase();
    employees
        .into_iter()
        .filter(|employee| {
            employee
                .name
                .as_ref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Maximum of all non-null salaries; 0 for an empty or all-null list.
pub fn highest_salary(employees: &[Employee]) -> i64 {
    employees
        .iter()
        .filter_map(|employee| employee.salary)
        .max()
        .unwrap_or(0)
}

/// Names of the top earners, highest salary first.
///
/// Employees without a salary are excluded. The sort is stable, so ties
/// keep their original list order. At most [`TOP_EARNER_COUNT`] names
/// are returned; fewer qualifying employees yield all of them.
pub fn top_earner_names(mut employees: Vec<Employee>) -> Vec<String> {
    employees.retain(|employee| employee.salary.is_some());
    employees.sort_by_key(|employee| Reverse(employee.salary));
    employees
        .into_iter()
        .take(TOP_EARNER_COUNT)
        .filter_map(|employee| employee.name)
        .collect()
}
