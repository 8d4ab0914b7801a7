//! Shared error, result and logging types

pub mod error;
pub mod logging;
pub mod result;
