#![forbid(unsafe_code)]

//! `gridsys` command-line front end.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod query;

pub use cli::{run, run_from_env, run_with_output};
pub use config::GridsysConfig;
pub use error::{CliError, Result};
pub use query::{decode_query, encode_query};
