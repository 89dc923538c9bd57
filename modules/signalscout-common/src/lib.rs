pub mod cache;
pub mod config;
pub mod error;
pub mod types;

pub use cache::FetchCache;
pub use config::Config;
pub use error::{Result, ScoutError};
pub use types::*;
