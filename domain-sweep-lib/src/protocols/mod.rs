//! Protocol implementations for availability checking.

/// RDAP (Registration Data Access Protocol) implementation
pub mod rdap;

pub use rdap::{classify_error, classify_status, RdapChecker};
