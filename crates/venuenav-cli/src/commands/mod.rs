// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments,
// loads the venue once and dispatches to these handlers.

pub mod destinations;
pub mod map;
pub mod route;
pub mod validate;
