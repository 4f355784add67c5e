//! Qobuz Favorites Tool Library
//!
//! This library moves tracks from Qobuz playlists into the user's favorites and
//! removes favorites in bulk, optionally narrowed down by a text query. It
//! contains the Qobuz API client, the batch pipeline that drives it, the
//! in-memory session registry, and the two front ends (web app and CLI).
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the web app, including the progress event stream
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error type shared across the crate
//! - `management` - Session registry and login handling
//! - `pipeline` - Pagination, filtering and batch mutation of favorites
//! - `qobuz` - Qobuz JSON API client
//! - `server` - Router assembly and HTTP server start-up
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use qobuzfav::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> qobuzfav::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod pipeline;
pub mod qobuz;
pub mod server;
pub mod types;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// All fallible operations of the crate report a [`Error`], which keeps the
/// distinction between transport problems, upstream rejections and local
/// configuration mistakes available to the callers.
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Searching playlists...");
/// info!("Found {} playlists", count);
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
/// success!("Import completed");
/// success!("Removed {} favorites", count);
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
/// Only meant for fatal conditions of the command-line front end. The
/// pipeline and the web app never call it.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
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
/// # Example
///
/// ```
/// warning!("{} tracks could not be added", failed);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
