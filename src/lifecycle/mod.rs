//! Process lifecycle management.
//!
//! # Design Decisions
//! - Single shutdown coordinator owned by main; everything else holds
//!   cheap cloneable listeners
//! - Shutdown interrupts pending retry delays rather than letting an
//!   in-flight request sleep through teardown

pub mod shutdown;

pub use shutdown::{Shutdown, ShutdownListener};
