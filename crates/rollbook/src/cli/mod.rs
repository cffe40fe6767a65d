//! Command-line interface for rollbook.
//!
//! This module provides the CLI structure and output rendering for the
//! `rollbook` binary.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AttendanceCommand, ConfigCommand, OutputFormat, ReportCommand, ServeCommand, StatusCommand,
    StudentsCommand,
};

/// rollbook - Track student attendance
///
/// Registers students, marks daily attendance and reports attendance rates.
/// All state lives in a single JSON file.
#[derive(Debug, Parser)]
#[command(name = "rollbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the data file (overrides configuration)
    #[arg(long, global = true, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the JSON HTTP API
    Serve(ServeCommand),

    /// Manage students
    #[command(subcommand)]
    Students(StudentsCommand),

    /// Mark and list attendance
    #[command(subcommand)]
    Attendance(AttendanceCommand),

    /// Per-student attendance report
    Report(ReportCommand),

    /// Overall attendance statistics
    Stats(ReportCommand),

    /// Show data file status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
