//! # Faculty Core
//!
//! Core types shared by every Faculty crate:
//!
//! - [`errors`]: Application error type with an error kind and an `anyhow` cause
//! - [`capabilities`]: Stable capability (permission) codes for teaching staff
//!
//! # Example
//!
//! ```ignore
//! use faculty_core::errors::AppError;
//! use faculty_core::capabilities;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Group not found"));
//! let code = capabilities::GENERATE_REPORTS;
//! ```

pub mod capabilities;
pub mod errors;

pub use errors::{AppError, ErrorKind};
