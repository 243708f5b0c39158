//! Unit tests for the project module.

mod project_service_tests;
mod support;
