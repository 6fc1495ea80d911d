//! discosync library
//!
//! Keeps a Spotify playlist in sync with the complete discography of an
//! artist. The library walks the artist's albums and singles into a
//! deduplicated track catalog, caches that catalog for a few hours, diffs it
//! against a playlist and appends whatever is missing in chunks of 100.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the sync server
//! - `app` - Process-wide service handles built once at startup
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `errors` - Error taxonomy shared by every layer
//! - `management` - Catalog cache and its storage backends
//! - `server` - Router and listener for the HTTP server
//! - `spotify` - Spotify Web API transport, paging, catalog and playlist operations
//! - `sync` - The two sync operations composed from the pieces above
//! - `types` - Data structures and type definitions
//! - `utils` - Artist reference parsing and track ordering helpers
//!
//! # Example
//!
//! ```
//! use discosync::{app::App, config, types::Credential};
//!
//! #[tokio::main]
//! async fn main() -> discosync::Result<()> {
//!     let settings = config::Settings::from_env()?;
//!     let app = App::from_settings(&settings)?;
//!     let credential = Credential::new("user", "BQC...");
//!     let outcome = app
//!         .orchestrator
//!         .augment_playlist("https://open.spotify.com/artist/4NHQUGzhtTLFvgF5SZesLK", "37i9dQ", &credential)
//!         .await?;
//!     println!("added {}", outcome.added_count);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

pub use errors::{Result, Stage, SyncError};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching albums for artist {}", artist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Added {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the binary's top level where nothing can be recovered.
/// Library code returns `SyncError` instead.
///
/// # Example
///
/// ```
/// error!("Failed to bind server address: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: a skipped album, a corrupt cache entry, a
/// cache write that did not go through.
///
/// # Example
///
/// ```
/// warning!("Could not fetch tracks for album {}: {}", album_id, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
