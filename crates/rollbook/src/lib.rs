//! `rollbook` - A flat-file student attendance tracker
//!
//! This library registers students, records daily attendance marks and
//! computes attendance statistics. All state lives in a single JSON file
//! that is loaded and rewritten whole on every operation. A JSON HTTP API
//! and a command-line interface sit on top of the same [`Tracker`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod registry;
pub mod report;
pub mod server;
pub mod storage;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{
    AttendanceRecord, AttendanceStatus, Dataset, NewAttendance, NewStudent, Student,
    StudentUpdate,
};
pub use report::{StudentAttendance, StudentReport, Summary, SystemStatistics};
pub use storage::{Store, StoreInfo};
pub use tracker::Tracker;
