//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `convert` command.
/// This command converts the title VOBs of a DVD folder to MP4.
pub mod convert;

/// Lists what `convert` would pick up, without running ffmpeg.
pub mod scan;

/// Reports which ffmpeg would be used and whether it runs.
pub mod check;
