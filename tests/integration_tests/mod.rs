//! Integration tests module
//!
//! End-to-end tests for hashpulse, including:
//! - Snapshot ingestion followed by trend, prediction and ranking queries
//! - The HTTP API and its response envelope
//! - Error handling for missing hashtags and invalid input

pub mod api_test;
pub mod error_scenarios;
pub mod pipeline_test;
