pub mod cli;
pub mod commands;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod vault;
