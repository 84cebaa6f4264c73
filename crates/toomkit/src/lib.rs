//! Application logic for the command-line front end.

pub mod app;
pub mod config;
pub mod errors;
pub mod output;
pub mod verify;
