use crate::error::TaskError;
use crate::record_store::{LoadStatus, RecordStore};
use crate::task::{Task, TaskStatus};
use chrono::NaiveDate;

pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of a successful `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Added {
    pub position: usize,
    pub due_date_valid: bool,
}

pub struct TaskList {
    store: RecordStore<Task>,
    tasks: Vec<Task>,
    status: LoadStatus,
}

impl TaskList {
    pub fn open(store: RecordStore<Task>) -> Self {
        let loaded = store.load();
        Self {
            store,
            tasks: loaded.records,
            status: loaded.status,
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_tasks_by_status(&self, status: TaskStatus) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.status == status)
            .map(|(i, t)| (i + 1, t))
            .collect()
    }

    /// Append a pending task. A due date that doesn't parse as `YYYY-MM-DD`
    /// is kept as typed.
    pub fn add(&mut self, title: &str, due_date: &str) -> Result<Added, TaskError> {
        let title = title.trim();
        let due_date = due_date.trim();
        if title.is_empty() {
            return Err(TaskError::MissingTitle);
        }
        if due_date.is_empty() {
            return Err(TaskError::MissingDueDate);
        }

        self.tasks.push(Task {
            title: title.to_string(),
            due_date: due_date.to_string(),
            status: TaskStatus::Pending,
        });
        if let Err(e) = self.store.save(&self.tasks) {
            self.tasks.pop();
            return Err(e.into());
        }

        Ok(Added {
            position: self.tasks.len(),
            due_date_valid: is_valid_due_date(due_date),
        })
    }

    /// Flip the task at 1-based `position` and persist. Returns the new status.
    pub fn toggle(&mut self, position: usize) -> Result<TaskStatus, TaskError> {
        let len = self.tasks.len();
        let task = position
            .checked_sub(1)
            .and_then(|i| self.tasks.get_mut(i))
            .ok_or(TaskError::OutOfRange { position, len })?;

        let previous = task.status;
        task.status = previous.toggled();
        let new_status = task.status;

        if let Err(e) = self.store.save(&self.tasks) {
            self.tasks[position - 1].status = previous;
            return Err(e.into());
        }
        Ok(new_status)
    }
}

pub fn is_valid_due_date(due_date: &str) -> bool {
    NaiveDate::parse_from_str(due_date, DUE_DATE_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::tempdir;

    fn open_in(dir: &Path) -> TaskList {
        TaskList::open(RecordStore::new(dir.join("tasks.json")))
    }

    #[test]
    fn test_add_then_list_shows_pending() {
        let temp = tempdir().unwrap();
        let mut list = open_in(temp.path());

        let added = list.add("Finish report", "2024-05-01").unwrap();
        assert_eq!(
            added,
            Added {
                position: 1,
                due_date_valid: true
            }
        );

        let reopened = open_in(temp.path());
        assert_eq!(
            reopened.tasks(),
            &[Task {
                title: "Finish report".to_string(),
                due_date: "2024-05-01".to_string(),
                status: TaskStatus::Pending,
            }]
        );
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let temp = tempdir().unwrap();
        let mut list = open_in(temp.path());

        assert!(matches!(list.add("   ", "2024-05-01"), Err(TaskError::MissingTitle)));
        assert!(matches!(list.add("Call mom", ""), Err(TaskError::MissingDueDate)));
        assert!(list.tasks().is_empty());
        assert!(!temp.path().join("tasks.json").exists());
    }

    #[test]
    fn test_add_accepts_malformed_due_date() {
        let temp = tempdir().unwrap();
        let mut list = open_in(temp.path());

        let added = list.add("Taxes", "next friday").unwrap();
        assert!(!added.due_date_valid);
        assert_eq!(open_in(temp.path()).tasks()[0].due_date, "next friday");
    }

    #[test]
    fn test_toggle_flips_and_persists() {
        let temp = tempdir().unwrap();
        let mut list = open_in(temp.path());
        list.add("Finish report", "2024-05-01").unwrap();

        assert_eq!(list.toggle(1).unwrap(), TaskStatus::Completed);
        assert_eq!(open_in(temp.path()).tasks()[0].status, TaskStatus::Completed);

        let mut list = open_in(temp.path());
        assert_eq!(list.toggle(1).unwrap(), TaskStatus::Pending);
        assert_eq!(open_in(temp.path()).tasks()[0].status, TaskStatus::Pending);
    }

    #[test]
    fn test_toggle_out_of_range_leaves_store_unchanged() {
        let temp = tempdir().unwrap();
        let mut list = open_in(temp.path());
        list.add("Finish report", "2024-05-01").unwrap();
        let before = fs_contents(temp.path());

        assert!(matches!(
            list.toggle(2),
            Err(TaskError::OutOfRange { position: 2, len: 1 })
        ));
        assert!(matches!(
            list.toggle(0),
            Err(TaskError::OutOfRange { position: 0, len: 1 })
        ));
        assert_eq!(fs_contents(temp.path()), before);
        assert_eq!(list.tasks()[0].status, TaskStatus::Pending);
    }

    #[test]
    fn test_get_tasks_by_status_keeps_positions() {
        let temp = tempdir().unwrap();
        let mut list = open_in(temp.path());
        list.add("a", "2024-01-01").unwrap();
        list.add("b", "2024-01-02").unwrap();
        list.add("c", "2024-01-03").unwrap();
        list.toggle(2).unwrap();

        let pending: Vec<usize> = list
            .get_tasks_by_status(TaskStatus::Pending)
            .into_iter()
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(pending, vec![1, 3]);
        assert_eq!(list.get_tasks_by_status(TaskStatus::Completed)[0].1.title, "b");
    }

    fn fs_contents(dir: &Path) -> String {
        std::fs::read_to_string(dir.join("tasks.json")).unwrap()
    }
}
