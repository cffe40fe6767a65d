//! Student registry: create, read, update and delete students.
//!
//! Each operation is one full load (and, for writes, save) of the dataset.

use tracing::info;

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::model::{NewStudent, Student, StudentId, StudentUpdate};
use crate::storage::Store;

/// Student lifecycle operations over a [`Store`].
#[derive(Debug, Clone, Copy)]
pub struct StudentRegistry<'a> {
    store: &'a Store,
    clock: &'a dyn Clock,
}

impl<'a> StudentRegistry<'a> {
    /// Create a registry over `store`, stamping new students with `clock`.
    #[must_use]
    pub fn new(store: &'a Store, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// All students in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be loaded.
    pub fn list(&self) -> Result<Vec<Student>> {
        Ok(self.store.load()?.students)
    }

    /// Register a new student.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `input` fails validation, or a
    /// storage error.
    pub fn create(&self, input: NewStudent) -> Result<Student> {
        input.validate()?;
        let created_date = self.clock.now();

        let student = self.store.update(|data| {
            let student = Student {
                id: data.next_student_id(),
                name: input.name,
                roll_number: input.roll_number,
                email: input.email,
                created_date,
            };
            data.students.push(student.clone());
            Ok(student)
        })?;

        info!(id = student.id, roll_number = %student.roll_number, "Registered student");
        Ok(student)
    }

    /// Look up one student.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] if no student has `id`.
    pub fn get(&self, id: StudentId) -> Result<Student> {
        self.store
            .load()?
            .student(id)
            .cloned()
            .ok_or(Error::StudentNotFound { id })
    }

    /// Merge the supplied fields into an existing student.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] if no student has `id`, checked
    /// first, or [`Error::InvalidInput`] if a supplied field fails validation.
    pub fn update(&self, id: StudentId, changes: StudentUpdate) -> Result<Student> {
        let student = self.store.update(|data| {
            let student = data.student_mut(id).ok_or(Error::StudentNotFound { id })?;
            changes.validate()?;
            changes.apply(student);
            Ok(student.clone())
        })?;

        info!(id, "Updated student");
        Ok(student)
    }

    /// Remove a student. Their attendance records are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] if no student has `id`.
    pub fn delete(&self, id: StudentId) -> Result<()> {
        self.store.update(|data| {
            let index = data
                .students
                .iter()
                .position(|s| s.id == id)
                .ok_or(Error::StudentNotFound { id })?;
            data.students.remove(index);
            Ok(())
        })?;

        info!(id, "Deleted student");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    struct Fixture {
        _dir: tempfile::TempDir,
        store: Store,
        clock: FixedClock,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let store = Store::open(dir.path().join("data.json")).unwrap();
            let clock = FixedClock(
                NaiveDate::from_ymd_opt(2024, 1, 10)
                    .unwrap()
                    .and_hms_opt(9, 15, 0)
                    .unwrap(),
            );
            Self {
                _dir: dir,
                store,
                clock,
            }
        }

        fn registry(&self) -> StudentRegistry<'_> {
            StudentRegistry::new(&self.store, &self.clock)
        }
    }

    fn new_student(name: &str, roll: &str) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            roll_number: roll.to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let fx = Fixture::new();
        let registry = fx.registry();

        for n in 1..=4 {
            let student = registry
                .create(new_student(&format!("S{n}"), &format!("R{n}")))
                .unwrap();
            assert_eq!(student.id, n);
        }
    }

    #[test]
    fn test_create_stamps_clock_time() {
        let fx = Fixture::new();
        let student = fx.registry().create(new_student("Alice", "R1")).unwrap();
        assert_eq!(student.created_date, fx.clock.0);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let fx = Fixture::new();
        let mut input = new_student("Alice", "R1");
        input.email = "nope".to_string();

        assert!(fx.registry().create(input).unwrap_err().is_invalid_input());
        assert!(fx.registry().list().unwrap().is_empty());
    }

    #[test]
    fn test_list_in_insertion_order() {
        let fx = Fixture::new();
        let registry = fx.registry();
        registry.create(new_student("Zed", "R9")).unwrap();
        registry.create(new_student("Amy", "R1")).unwrap();

        let names: Vec<_> = registry.list().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Zed", "Amy"]);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let fx = Fixture::new();
        let err = fx.registry().get(1).unwrap_err();
        assert!(matches!(err, Error::StudentNotFound { id: 1 }));
    }

    #[test]
    fn test_update_merges_partial_fields() {
        let fx = Fixture::new();
        let registry = fx.registry();
        registry.create(new_student("A", "R1")).unwrap();

        let updated = registry
            .update(
                1,
                StudentUpdate {
                    name: Some("B".to_string()),
                    ..StudentUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "B");
        assert_eq!(updated.roll_number, "R1");
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(registry.get(1).unwrap(), updated);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let fx = Fixture::new();
        let err = fx.registry().update(3, StudentUpdate::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_missing_wins_over_invalid_fields() {
        let fx = Fixture::new();
        let err = fx
            .registry()
            .update(
                3,
                StudentUpdate {
                    email: Some("nope".to_string()),
                    ..StudentUpdate::default()
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let fx = Fixture::new();
        let registry = fx.registry();
        registry.create(new_student("Alice", "R1")).unwrap();

        registry.delete(1).unwrap();
        assert!(registry.get(1).unwrap_err().is_not_found());
        assert!(registry.delete(1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_ids_reuse_after_delete() {
        let fx = Fixture::new();
        let registry = fx.registry();
        registry.create(new_student("A", "R1")).unwrap();
        registry.create(new_student("B", "R2")).unwrap();
        registry.delete(1).unwrap();

        let c = registry.create(new_student("C", "R3")).unwrap();
        assert_eq!(c.id, 2);
        let ids: Vec<_> = registry.list().unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, [2, 2]);
    }
}
