//! Employee domain subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (domain operation, retry orchestration)
//!     → upstream subsystem (one retried call)
//!     → rankings.rs (pure post-processing for derived reads)
//! ```

pub mod rankings;
pub mod service;
pub mod types;

pub use service::EmployeeService;
pub use types::{CreateEmployeeInput, Employee, InputError};
