//! Common test utilities and helpers
//!
//! Shared fakes and workspace fixtures for the integration tests.

#![allow(dead_code)]

pub mod mock_services;
pub mod test_fixtures;
