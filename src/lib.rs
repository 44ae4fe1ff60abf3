//! Library entry point for the disco CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod report;
pub mod runtime;
pub mod scanner;
pub mod utils;
