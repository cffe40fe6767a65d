//! `rollbook` - CLI for the rollbook attendance tracker
//!
//! This binary serves the JSON HTTP API and exposes the same operations as
//! command-line subcommands.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use rollbook::cli::{
    output, AttendanceCommand, Cli, Command, ConfigCommand, OutputFormat, ServeCommand,
    StudentsCommand,
};
use rollbook::{init_logging, Config, NewAttendance, NewStudent, StudentUpdate, Tracker};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, letting --data-file win over every other source
    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(path) = cli.data_file.clone() {
        config.storage.data_file = Some(path);
    }

    // Execute the command
    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::Serve(serve_cmd) => handle_serve(config, &serve_cmd),
        Command::Students(cmd) => handle_students(&open_tracker(&config)?, cmd),
        Command::Attendance(cmd) => handle_attendance(&open_tracker(&config)?, cmd),
        Command::Report(cmd) => {
            let report = open_tracker(&config)?.report()?;
            println!("{}", output::report(&report, cmd.format)?);
            Ok(())
        }
        Command::Stats(cmd) => {
            let stats = open_tracker(&config)?.statistics()?;
            println!("{}", output::statistics(&stats, cmd.format)?);
            Ok(())
        }
        Command::Status(cmd) => handle_status(&open_tracker(&config)?, cmd.json),
    }
}

fn open_tracker(config: &Config) -> anyhow::Result<Tracker> {
    let path = config.data_file();
    Tracker::open(&path).with_context(|| format!("opening data file {}", path.display()))
}

fn handle_serve(mut config: Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    if let Some(host) = &cmd.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    config.validate()?;
    let addr = config.bind_addr()?;
    let tracker = Arc::new(open_tracker(&config)?);

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(rollbook::server::serve(tracker, addr))?;
    Ok(())
}

fn handle_students(tracker: &Tracker, cmd: StudentsCommand) -> anyhow::Result<()> {
    let registry = tracker.students();
    match cmd {
        StudentsCommand::List { format } => {
            println!("{}", output::students(&registry.list()?, format)?);
        }
        StudentsCommand::Add {
            name,
            roll_number,
            email,
        } => {
            let student = registry.create(NewStudent {
                name,
                roll_number,
                email,
            })?;
            println!("Student added successfully (id {})", student.id);
        }
        StudentsCommand::Show { id, format } => {
            println!("{}", output::student(&registry.get(id)?, format)?);
        }
        StudentsCommand::Update {
            id,
            name,
            roll_number,
            email,
        } => {
            let changes = StudentUpdate {
                name,
                roll_number,
                email,
            };
            if changes.is_empty() {
                println!("Nothing to update; pass --name, --roll-number or --email.");
                return Ok(());
            }
            let student = registry.update(id, changes)?;
            println!("Student updated");
            println!("{}", output::student(&student, OutputFormat::Plain)?);
        }
        StudentsCommand::Remove { id } => {
            registry.delete(id)?;
            println!("Student deleted");
        }
    }
    Ok(())
}

fn handle_attendance(tracker: &Tracker, cmd: AttendanceCommand) -> anyhow::Result<()> {
    match cmd {
        AttendanceCommand::Mark {
            student_id,
            status,
            date,
        } => {
            if tracker.students().get(student_id).is_err() {
                tracing::warn!(student_id, "Marking attendance for an unregistered student");
            }
            let record = tracker.attendance().mark(NewAttendance {
                student_id,
                date,
                status,
            })?;
            println!(
                "Attendance marked: {} {} on {} (record {})",
                record.student_id, record.status, record.date, record.id
            );
        }
        AttendanceCommand::List { date, format } => {
            println!("{}", output::records(&tracker.attendance().list(date)?, format)?);
        }
        AttendanceCommand::Student { student_id, format } => {
            let view = tracker.student_attendance(student_id)?;
            println!("{}", output::student_attendance(&view, format)?);
        }
    }
    Ok(())
}

fn handle_status(tracker: &Tracker, json: bool) -> anyhow::Result<()> {
    let info = tracker.store().info()?;
    if json {
        let status = serde_json::json!({
            "data_file": info.path,
            "exists": info.exists,
            "size_bytes": info.size_bytes,
            "students": info.students,
            "records": info.records,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rollbook status");
        println!("---------------");
        println!("Data file:     {}", info.path.display());
        if info.exists {
            println!("Size:          {} bytes", info.size_bytes);
        } else {
            println!("Size:          (not created yet)");
        }
        println!("Students:      {}", info.students);
        println!("Records:       {}", info.records);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data file:          {}", config.data_file().display());
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
