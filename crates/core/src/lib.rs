//! Core utilities for Velora back-office tools
//!
//! This crate provides shared functionality used across the admin toolkit:
//!
//! - **Error handling**: structured errors with codes, context, and recovery suggestions
//! - **Validation**: fluent input validation for form-style payloads before they
//!   reach the backend
//!
//! # Example
//!
//! ```rust
//! use velora_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "Summer dress")
//!     .max_length("name", "Summer dress", 120)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
