//! Integration tests for the build orchestrator.

mod build_tests;
mod common;
