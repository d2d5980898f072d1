//! Common utilities and types shared across webhdfs

pub mod config;
pub mod error;
pub mod utils;

pub use config::Configuration;
pub use error::{Error, Result};
pub use utils::{
    current_user, encode_path, format_bytes, format_mode, format_timestamp, join_path,
    parse_duration,
};
