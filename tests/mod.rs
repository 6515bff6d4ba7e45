//! Integration tests for Digitalflix
//!
//! Tests are organized by component:
//! - catalog_test: catalog REST client tests (mocked `/movies` resource)
//! - embed_test: YouTube embed URL normalization
//! - playback_test: playback clock, controls overlay and watch timers
//! - cli_test: argument parsing and command handlers
//! - ui_test: screen rendering and theme tests
//! - app_test: end-to-end screen flows (Login -> Dashboard -> Detail -> Watch, Admin, Profile)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
