//! Digitalflix - movie catalog browser for the terminal
//!
//! Browse the catalog, watch trailers and titles in a simulated player,
//! and manage catalog entries against the `/api/movies` REST resource.
//!
//! # Modules
//!
//! - `models` - Catalog items, patches, watch parameters, profile
//! - `api` - Catalog REST client
//! - `player` - Embed URL normalization, playback state and timers
//! - `forms` - Text inputs and form validation
//! - `app` - Application state and navigation
//! - `ui` - TUI screens
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod forms;
pub mod logging;
pub mod models;
pub mod player;
pub mod ui;

// Re-export commonly used types
pub use models::{
    CatalogItem, CatalogPatch, TrailerSelection, UserProfile, WatchHistoryEntry, WatchParams,
};

pub use api::{CatalogClient, CatalogError};
pub use app::{App, AppEvent, AppRequest, AppState};
pub use config::Config;
