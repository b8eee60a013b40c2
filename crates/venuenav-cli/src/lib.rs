//! Venue navigation CLI library.
//!
//! Terminal styling, tracing setup and output formatting shared by the
//! `venuenav-cli` subcommands.

pub mod logging;
pub mod output;
pub mod terminal;
