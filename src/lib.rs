pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod interrupt;
pub mod prompt;
pub mod remote;
pub mod secret;
