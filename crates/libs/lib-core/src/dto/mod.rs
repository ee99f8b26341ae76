//! # Data Transfer Objects (DTOs)
//!
//! Request and response shapes of the REST API that are not plain database rows.

pub mod records;

pub use records::*;
