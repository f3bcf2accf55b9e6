//! Shared fixtures for the `marklogic_data` integration tests.

pub mod fixtures;
