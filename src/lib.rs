pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod network;
pub mod ui;

pub use error::{DisplayError, Result};
