pub mod actions;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod manifest;
pub mod patch;
pub mod tool;
pub mod ui;
pub mod warnings;

pub use error::{BumpError, Result};
