//! Utility functions and structs for the application.
pub mod cli;
pub mod config;
