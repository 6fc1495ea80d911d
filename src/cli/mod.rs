//! # CLI Module
//!
//! Command implementations behind the `discosync` binary. Each command
//! builds the process-wide [`App`](crate::app::App) once, runs one operation
//! and reports the outcome with the console macros.
//!
//! ## Commands
//!
//! - [`serve`] - Run the HTTP sync server
//! - [`create`] - Create a playlist from an artist's discography
//! - [`augment`] - Append an artist's missing tracks to a playlist
//! - [`playlists`] - List the caller's playlists as a table
//! - [`clear_cache`] - Drop the cached catalog of an artist
//!
//! One-shot commands take the access token from `--token` or
//! `SPOTIFY_ACCESS_TOKEN` and resolve the user behind it through `/me`.

mod cache;
mod playlist;
mod serve;

pub use cache::clear_cache;
pub use playlist::{augment, create, playlists};
pub use serve::serve;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{app::App, config::Settings, error};

pub(crate) fn build_app() -> App {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    match App::from_settings(&settings) {
        Ok(app) => app,
        Err(e) => error!("Cannot set up services: {}", e),
    }
}

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
