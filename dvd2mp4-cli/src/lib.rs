// dvd2mp4-cli/src/lib.rs
//
// Library portion of the dvd2mp4 CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;

// Re-export items needed by the binary or integration tests
pub use cli::{CheckArgs, Cli, Commands, ConvertArgs, ScanArgs};
pub use commands::check::run_check;
pub use commands::convert::run_convert;
pub use commands::scan::run_scan;
pub use error::{CliErrorContext, CliResult};
