//! # CLI Module
//!
//! Command-line entry points for the proxy. Both commands start the same HTTP
//! server; they differ only in what happens around it.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the proxy until the process is stopped
//! - [`auth`] - Runs the proxy and opens `/spotify/login` in the default browser,
//!   the first step of obtaining `SPOTIFY_REFRESH_TOKEN`
//!
//! ## Error Handling
//!
//! Startup failures (bad bind address, port in use) print a red error line and
//! exit with status 1 through the crate's `error!` macro.

mod auth;
mod serve;

pub use auth::auth;
pub use serve::serve;
