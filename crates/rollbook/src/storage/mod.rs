//! Storage layer for rollbook.
//!
//! The whole [`Dataset`] lives in one pretty-printed JSON file. Every
//! operation loads the full file, works on the in-memory copy, and writes
//! the full file back. A missing file is the empty dataset, not an error.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::Dataset;

/// Flat-file store holding the complete dataset.
///
/// Read-modify-write cycles issued through [`Store::update`] are serialized
/// by a single lock, so concurrent callers in one process never lose each
/// other's writes. Other processes writing the same file are not
/// coordinated with; the last save wins.
#[derive(Debug)]
pub struct Store {
    /// Path to the data file.
    path: PathBuf,
    /// Held for the duration of each read-modify-write cycle.
    write_lock: Mutex<()>,
}

impl Store {
    /// Open a store backed by the file at `path`.
    ///
    /// Creates the parent directories if they don't exist. The file itself
    /// is only created by the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directories cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        info!("Using data file {}", path.display());
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted dataset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataFile`] if the file exists but cannot be read or
    /// does not hold a valid dataset.
    pub fn load(&self) -> Result<Dataset> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No data file at {}, starting empty", self.path.display());
                return Ok(Dataset::default());
            }
            Err(err) => return Err(Error::data_file(&self.path, err)),
        };

        let dataset: Dataset =
            serde_json::from_str(&raw).map_err(|err| Error::data_file(&self.path, err))?;
        debug!(
            students = dataset.students.len(),
            records = dataset.attendance.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Overwrite the persisted dataset.
    ///
    /// The new contents are written to a sibling temporary file first and
    /// renamed over the data file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn save(&self, dataset: &Dataset) -> Result<()> {
        let mut body = serde_json::to_string_pretty(dataset)?;
        body.push('\n');

        let tmp = self.temp_path();
        if let Err(err) = fs::write(&tmp, body).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }

        debug!(
            students = dataset.students.len(),
            records = dataset.attendance.len(),
            "Saved dataset"
        );
        Ok(())
    }

    /// Run one load-modify-save cycle.
    ///
    /// `f` receives the freshly loaded dataset. The result is saved only if
    /// `f` returns `Ok`; on error nothing is written.
    ///
    /// # Errors
    ///
    /// Returns the error from loading, from `f`, or from saving.
    pub fn update<T>(&self, f: impl FnOnce(&mut Dataset) -> Result<T>) -> Result<T> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut dataset = self.load()?;
        let value = f(&mut dataset)?;
        self.save(&dataset)?;
        Ok(value)
    }

    /// Describe the data file backing this store.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be loaded.
    pub fn info(&self) -> Result<StoreInfo> {
        let size_bytes = fs::metadata(&self.path).map(|m| m.len()).ok();
        let dataset = self.load()?;

        Ok(StoreInfo {
            path: self.path.clone(),
            exists: size_bytes.is_some(),
            size_bytes: size_bytes.unwrap_or(0),
            students: dataset.students.len(),
            records: dataset.attendance.len(),
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Facts about the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    /// Path to the data file.
    pub path: PathBuf,
    /// Whether the file has been written yet.
    pub exists: bool,
    /// Size of the file in bytes (0 if missing).
    pub size_bytes: u64,
    /// Number of students stored.
    pub students: usize,
    /// Number of attendance records stored.
    pub records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttendanceRecord, AttendanceStatus, Student};
    use chrono::{NaiveDate, NaiveTime};

    fn create_test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = Store::open(dir.path().join("attendance_data.json")).unwrap();
        (dir, store)
    }

    fn sample_dataset() -> Dataset {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        Dataset {
            students: vec![Student {
                id: 1,
                name: "Alice".to_string(),
                roll_number: "R1".to_string(),
                email: "a@x.com".to_string(),
                created_date: day.and_hms_opt(9, 0, 0).unwrap(),
            }],
            attendance: vec![AttendanceRecord {
                id: 1,
                student_id: 1,
                date: day,
                status: AttendanceStatus::Present,
                time: NaiveTime::from_hms_opt(9, 1, 2).unwrap(),
            }],
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, store) = create_test_store();
        assert_eq!(store.load().unwrap(), Dataset::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (_dir, store) = create_test_store();
        let dataset = sample_dataset();

        store.save(&dataset).unwrap();
        assert_eq!(store.load().unwrap(), dataset);
    }

    #[test]
    fn test_empty_dataset_roundtrip() {
        let (_dir, store) = create_test_store();
        store.save(&Dataset::default()).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"students\": []"));
        assert!(raw.contains("\"attendance\": []"));
        assert_eq!(store.load().unwrap(), Dataset::default());
    }

    #[test]
    fn test_save_is_pretty_printed() {
        let (_dir, store) = create_test_store();
        store.save(&sample_dataset()).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("{\n  \"students\": [\n"));
        assert!(raw.contains("\"created_date\": \"2024-01-10 09:00:00\""));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let (dir, store) = create_test_store();
        store.save(&sample_dataset()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_save_removes_temp_file() {
        let (_dir, store) = create_test_store();
        // A non-empty directory where the data file should be makes the save fail
        fs::create_dir(store.path()).unwrap();
        fs::write(store.path().join("keep"), "x").unwrap();

        assert!(store.save(&sample_dataset()).is_err());
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (_dir, store) = create_test_store();
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::DataFile { .. }));
    }

    #[test]
    fn test_update_persists_on_success() {
        let (_dir, store) = create_test_store();
        let count = store
            .update(|data| {
                data.students.extend(sample_dataset().students);
                Ok(data.students.len())
            })
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(store.load().unwrap().students.len(), 1);
    }

    #[test]
    fn test_update_discards_on_error() {
        let (_dir, store) = create_test_store();
        store.save(&sample_dataset()).unwrap();

        let result: Result<()> = store.update(|data| {
            data.students.clear();
            Err(Error::StudentNotFound { id: 42 })
        });

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(store.load().unwrap(), sample_dataset());
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested/deeper/data.json");

        let store = Store::open(&nested).unwrap();
        assert!(nested.parent().unwrap().exists());
        assert_eq!(store.path(), nested);
    }

    #[test]
    fn test_info_reports_counts() {
        let (_dir, store) = create_test_store();
        let before = store.info().unwrap();
        assert!(!before.exists);
        assert_eq!(before.size_bytes, 0);

        store.save(&sample_dataset()).unwrap();
        let after = store.info().unwrap();
        assert!(after.exists);
        assert!(after.size_bytes > 0);
        assert_eq!(after.students, 1);
        assert_eq!(after.records, 1);
    }

    #[test]
    fn test_concurrent_updates_do_not_lose_writes() {
        let (_dir, store) = create_test_store();
        let store = std::sync::Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .update(|data| {
                            let mut student = sample_dataset().students.remove(0);
                            student.id = data.next_student_id();
                            data.students.push(student);
                            Ok(())
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let ids: Vec<_> = store.load().unwrap().students.iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }
}
