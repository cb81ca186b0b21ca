pub mod config;
pub mod db;
pub mod error;
pub mod exercise;
pub mod oauth_utils;
pub mod progress;
pub mod server;
pub mod sync;
pub mod utils;
pub mod workout;

pub use error::IronlogError;
