//! Configuration management for the Qobuz favorites tool.
//!
//! Values are read from the process environment after loading an optional
//! `.env` file from the platform's local data directory:
//!
//! - Linux: `~/.local/share/qobuzfav/.env`
//! - macOS: `~/Library/Application Support/qobuzfav/.env`
//! - Windows: `%LOCALAPPDATA%/qobuzfav/.env`
//!
//! Variables already set in the environment win over the file.
//!
//! | Variable          | Required | Default                                  |
//! |-------------------|----------|------------------------------------------|
//! | `QOBUZ_APP_ID`    | yes      |                                          |
//! | `QOBUZ_API_URL`   | no       | `https://www.qobuz.com/api.json/0.2`     |
//! | `SERVER_ADDRESS`  | no       | `127.0.0.1:8080`                         |
//! | `STATIC_DIR`      | no       | none, the web UI is not served           |
//! | `QOBUZ_EMAIL`     | CLI only |                                          |
//! | `QOBUZ_PASSWORD`  | CLI only |                                          |

use std::{env, path::PathBuf};

use crate::{Error, Res};

pub const DEFAULT_QOBUZ_API_URL: &str = "https://www.qobuz.com/api.json/0.2";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";

/// Loads the `.env` file from the local data directory, if there is one.
///
/// The directory is created on first run so users find the place where the
/// build script dropped `.env.example`. A missing `.env` is not an error;
/// everything can also come from the process environment.
///
/// # Returns
///
/// `Ok(())` once the file, if present, has been applied.
///
/// # Errors
///
/// - [`Error::Io`] if the data directory cannot be created
/// - [`Error::Config`] if the `.env` file exists but cannot be parsed
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    }
    Ok(())
}

/// Location of the `.env` file, `qobuzfav/.env` below the local data directory.
///
/// Falls back to the working directory on platforms without a data directory.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("qobuzfav/.env");
    path
}

/// Address the web app binds to.
///
/// Reads `SERVER_ADDRESS` and defaults to [`DEFAULT_SERVER_ADDRESS`]. The
/// value is parsed as a socket address when the server starts.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g. "127.0.0.1:8080"
/// ```
pub fn server_addr() -> String {
    optional("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Root of the Qobuz JSON API.
///
/// Reads `QOBUZ_API_URL` and defaults to [`DEFAULT_QOBUZ_API_URL`]. A
/// trailing slash is removed so endpoints can be appended with `/`.
pub fn qobuz_apiurl() -> String {
    optional("QOBUZ_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_QOBUZ_API_URL.to_string())
}

/// Application id sent as `X-App-Id` with every Qobuz request.
///
/// # Errors
///
/// Returns [`Error::Config`] when `QOBUZ_APP_ID` is unset or blank.
pub fn qobuz_app_id() -> Res<String> {
    required("QOBUZ_APP_ID")
}

/// Account email used by the CLI commands to log in.
///
/// # Errors
///
/// Returns [`Error::Config`] when `QOBUZ_EMAIL` is unset or blank.
pub fn qobuz_email() -> Res<String> {
    required("QOBUZ_EMAIL")
}

/// Plain account password used by the CLI commands. It is hashed before
/// it leaves the process.
///
/// # Errors
///
/// Returns [`Error::Config`] when `QOBUZ_PASSWORD` is unset or blank.
pub fn qobuz_password() -> Res<String> {
    required("QOBUZ_PASSWORD")
}

/// Directory holding a built web frontend, from `STATIC_DIR`.
///
/// When set, the router serves its files and falls back to its
/// `index.html` for client-side routes. Otherwise only the API is served.
pub fn static_dir() -> Option<PathBuf> {
    optional("STATIC_DIR").map(PathBuf::from)
}

/// Reads a variable that must be present and non-blank.
fn required(key: &str) -> Res<String> {
    optional(key).ok_or_else(|| Error::Config(format!("{} must be set", key)))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
