//! CLI - Command Line Interface for Digitalflix
//!
//! Every catalog operation is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Browse the catalog
//! digitalflix list --search action --json
//! digitalflix get 3
//!
//! # Manage entries
//! digitalflix create --title "Night Terror" --genre Horror --rating 7.1 --image https://...
//! digitalflix update 3 --featured true
//! digitalflix delete 3
//!
//! # Player helpers
//! digitalflix embed "https://youtu.be/dQw4w9WgXcQ" --profile watch
//! digitalflix watch "id=1&title=Explosive%20Action"
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::{CatalogItem, CatalogPatch};
use crate::player::EmbedProfile;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Catalog item not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Digitalflix - movie catalog in your terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "digitalflix",
    version,
    about = "Movie catalog browser and admin for the terminal",
    long_about = "Browse, watch and manage the Digitalflix movie catalog.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  digitalflix                               Launch interactive TUI\n\
                  digitalflix list --featured               List featured movies\n\
                  digitalflix get 3 --json                  Show one movie as JSON\n\
                  digitalflix embed https://youtu.be/ID     Print the embed URL"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Catalog API base URL (overrides config and DIGITALFLIX_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode. `watch` opens the TUI, so it is not.
    pub fn is_cli_mode(&self) -> bool {
        matches!(&self.command, Some(cmd) if !matches!(cmd, Command::Watch(_)))
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List catalog entries
    #[command(visible_alias = "ls")]
    List(ListCmd),

    /// Show one catalog entry
    Get(GetCmd),

    /// Add a catalog entry
    Create(CreateCmd),

    /// Change fields of a catalog entry
    Update(UpdateCmd),

    /// Remove a catalog entry
    #[command(visible_alias = "rm")]
    Delete(DeleteCmd),

    /// Print the player embed URL for a YouTube link
    Embed(EmbedCmd),

    /// Open the TUI straight on the watch screen
    Watch(WatchCmd),
}

// =============================================================================
// Catalog Commands
// =============================================================================

/// List catalog entries, optionally filtered
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Case-insensitive filter on title or genre
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only featured entries
    #[arg(long, short = 'f')]
    pub featured: bool,

    /// Maximum number of results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// Show one entry by id
#[derive(Args, Debug)]
pub struct GetCmd {
    /// Catalog item id
    pub id: u64,
}

/// Fields for a new entry
#[derive(Args, Debug)]
pub struct CreateCmd {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub genre: String,

    /// Rating from 0 to 10
    #[arg(long)]
    pub rating: f32,

    /// Poster image URL
    #[arg(long)]
    pub image: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Release year
    #[arg(long)]
    pub year: Option<u16>,

    #[arg(long)]
    pub trailer_url: Option<String>,

    #[arg(long)]
    pub video_url: Option<String>,

    /// Show on the home screen hero
    #[arg(long)]
    pub featured: bool,
}

impl CreateCmd {
    pub fn to_item(&self) -> CatalogItem {
        let mut item = CatalogItem::new(&self.title, &self.genre, self.rating, &self.image);
        item.description = self.description.clone();
        item.release_year = self.year;
        item.trailer_url = self.trailer_url.clone();
        item.video_url = self.video_url.clone();
        item.featured = self.featured;
        item
    }
}

/// Fields to change on an entry; omitted fields are left alone
#[derive(Args, Debug)]
pub struct UpdateCmd {
    /// Catalog item id
    pub id: u64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub rating: Option<f32>,

    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub year: Option<u16>,

    #[arg(long)]
    pub trailer_url: Option<String>,

    #[arg(long)]
    pub video_url: Option<String>,

    #[arg(long)]
    pub featured: Option<bool>,
}

impl UpdateCmd {
    pub fn to_patch(&self) -> CatalogPatch {
        CatalogPatch {
            title: self.title.clone(),
            genre: self.genre.clone(),
            rating: self.rating,
            image_url: self.image.clone(),
            featured: self.featured,
            description: self.description.clone(),
            release_year: self.year,
            trailer_url: self.trailer_url.clone(),
            video_url: self.video_url.clone(),
        }
    }
}

/// Remove an entry by id
#[derive(Args, Debug)]
pub struct DeleteCmd {
    /// Catalog item id
    pub id: u64,
}

// =============================================================================
// Player Commands
// =============================================================================

/// Which player the embed URL is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ProfileArg {
    #[default]
    Trailer,
    Watch,
}

/// Convert a YouTube link into its embed URL
#[derive(Args, Debug)]
pub struct EmbedCmd {
    /// YouTube URL (watch, youtu.be, embed, /v/ forms)
    pub url: String,

    /// Player profile
    #[arg(long, short = 'p', value_enum, default_value_t = ProfileArg::Trailer)]
    pub profile: ProfileArg,

    /// Keep native player controls (watch profile only)
    #[arg(long)]
    pub controls: bool,
}

impl EmbedCmd {
    pub fn embed_profile(&self) -> EmbedProfile {
        match self.profile {
            ProfileArg::Trailer => EmbedProfile::Trailer,
            ProfileArg::Watch => EmbedProfile::Watch {
                controls: self.controls,
            },
        }
    }
}

/// Open the watch screen from a query string
#[derive(Args, Debug)]
pub struct WatchCmd {
    /// Query string such as `id=1&title=Foo&videoUrl=https://youtu.be/...`
    pub query: String,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Delete confirmation response
#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub id: u64,
    pub deleted: bool,
}

/// Embed command response
#[derive(Debug, Serialize, Deserialize)]
pub struct EmbedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub embed_url: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print plain text in human mode, JSON-wrapped data otherwise
    pub fn print_or<T: Serialize>(&self, data: T, text: impl std::fmt::Display) -> anyhow::Result<()> {
        if self.json {
            self.print(data)
        } else {
            println!("{}", text);
            Ok(())
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
