//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::model::{AttendanceStatus, StudentId};

/// Run the HTTP API.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Interface to bind (overrides configuration)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Student management commands.
#[derive(Debug, Subcommand)]
pub enum StudentsCommand {
    /// List all students
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Register a new student
    Add {
        /// Full name
        name: String,
        /// Roll number
        roll_number: String,
        /// Email address
        email: String,
    },

    /// Show one student
    Show {
        /// Student id
        id: StudentId,
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Change some of a student's fields
    Update {
        /// Student id
        id: StudentId,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New roll number
        #[arg(long)]
        roll_number: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a student (attendance records are kept)
    Remove {
        /// Student id
        id: StudentId,
    },
}

/// Attendance commands.
#[derive(Debug, Subcommand)]
pub enum AttendanceCommand {
    /// Mark a student present or absent
    Mark {
        /// Student id
        student_id: StudentId,
        /// Attendance status: Present or Absent (any case)
        #[arg(value_parser = parse_status)]
        status: AttendanceStatus,
        /// Day of the mark as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List attendance records
    List {
        /// Only records for this day (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one student's records and attendance rate
    Student {
        /// Student id
        student_id: StudentId,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Report and statistics arguments.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn parse_status(raw: &str) -> Result<AttendanceStatus, String> {
    raw.parse().map_err(|err: crate::Error| err.to_string())
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
