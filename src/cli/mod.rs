//! # CLI Module
//!
//! Command-line front end of the Qobuz favorites tool. Every command logs in
//! with the credentials from the environment, runs one pipeline operation,
//! and renders the result with tables, spinners and a progress bar.
//!
//! ## Commands
//!
//! - [`serve`] - Starts the web app
//! - [`search_playlists`] / [`playlist_tracks`] - Playlist lookup
//! - [`import`] - Adds the tracks of playlists to favorites
//! - [`list_favorites`] / [`preview`] - Favorites lookup with optional filtering
//! - [`delete`] - Removes all or matching favorites
//!
//! ## Usage Patterns
//!
//! ```bash
//! qobuzfav playlists --search "jazz classics" --mine-first
//! qobuzfav import 1234567 7654321
//! qobuzfav favorites --search miles
//! qobuzfav favorites delete --query "christmas" --yes
//! qobuzfav serve --open
//! ```
//!
//! Long-running commands report through [`progress::BarSink`], the terminal
//! implementation of [`crate::pipeline::ProgressSink`]. Fatal problems such
//! as missing credentials end the program through the `error!` macro.

mod auth;
mod favorites;
mod playlist;
pub mod progress;
mod serve;

pub use auth::login;
pub use favorites::delete;
pub use favorites::import;
pub use favorites::list_favorites;
pub use favorites::preview;
pub use playlist::playlist_tracks;
pub use playlist::search_playlists;
pub use serve::serve;
