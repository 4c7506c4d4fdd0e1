//! Command-line driver.
//!
//! All CLI logic lives here rather than in `main.rs` so it can be tested.
//! The entry point [`run_cli`] takes already-parsed [`Args`].

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOptions, DEFAULT_VERIFY_RUNS};
pub use commands::{
    apply_overrides, drive, error_exit, load_config, run_cli, solve, verify, DriveStop,
    RunOutcome, VerifySummary,
};
pub use output::{print_help, print_version, version_string};
