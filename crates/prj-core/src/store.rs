//! Filesystem-backed project storage
//!
//! One directory per project, one record file inside it. Reads are
//! forgiving: a missing or undecodable record means "no project here".
//! Writes are not: create, update, and delete failures surface as typed
//! errors with stable exit codes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::codec;
use crate::config::ProjectDefaults;
use crate::error::{Error, Result};
use crate::lifecycle::{self, ChangeSet};
use crate::record::{PROJECT_FILE, ProjectRecord};

/// Short display name for a project path: its final component
pub fn project_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Repository translating project paths to record operations
///
/// The date used for status stamping is injected at construction; the
/// repository never reads the system clock itself.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    defaults: ProjectDefaults,
    today: NaiveDate,
}

impl ProjectRepository {
    /// Create a repository stamping dates with the given calendar date
    pub fn new(defaults: ProjectDefaults, today: NaiveDate) -> Self {
        Self { defaults, today }
    }

    /// Create the project directory and its initial record
    ///
    /// If the directory lands but the record cannot be persisted, the
    /// directory is left in place; there is no rollback.
    pub fn create(&self, path: &Path, changes: &ChangeSet) -> Result<ProjectRecord> {
        if let Err(err) = fs::create_dir(path) {
            return Err(if err.kind() == io::ErrorKind::AlreadyExists {
                Error::AlreadyExists(project_name(path))
            } else {
                Error::PersistFailure {
                    path: path.to_path_buf(),
                    source: err,
                }
            });
        }

        let name = project_name(path);
        let record = lifecycle::apply(None, changes, &name, self.today, &self.defaults);
        self.persist(path, &record)?;
        info!(project = %name, status = %record.status, "Project created");
        Ok(record)
    }

    /// Read a project's record; `None` covers missing and corrupt alike
    ///
    /// The directory name is authoritative for `name`, whatever the record
    /// file says.
    pub fn read(&self, path: &Path) -> Option<ProjectRecord> {
        let file = path.join(PROJECT_FILE);
        let text = match fs::read_to_string(&file) {
            Ok(text) => text,
            Err(err) => {
                debug!(file = %file.display(), error = %err, "Record file not readable");
                return None;
            }
        };
        match codec::decode(&text) {
            Ok(mut record) => {
                record.name = project_name(path);
                Some(record)
            }
            Err(err) => {
                debug!(file = %file.display(), error = %err, "Record file not decodable");
                None
            }
        }
    }

    /// Apply changes to a project's record, initializing one if absent
    pub fn update(&self, path: &Path, changes: &ChangeSet) -> Result<ProjectRecord> {
        let name = project_name(path);
        let record = lifecycle::apply(self.read(path), changes, &name, self.today, &self.defaults);
        self.persist(path, &record)?;
        info!(project = %name, status = %record.status, "Project updated");
        Ok(record)
    }

    /// Remove the project directory and everything inside it
    pub fn delete(&self, path: &Path) -> Result<()> {
        if let Err(err) = fs::remove_dir_all(path) {
            debug!(path = %path.display(), error = %err, "Delete failed");
            return Err(Error::NotAProject(project_name(path)));
        }
        info!(project = %project_name(path), "Project deleted");
        Ok(())
    }

    /// Lazily enumerate the projects directly under `root`
    pub fn list(&self, root: &Path) -> ProjectList<'_> {
        ProjectList {
            repo: self,
            root: root.to_path_buf(),
        }
    }

    fn persist(&self, path: &Path, record: &ProjectRecord) -> Result<()> {
        let file = path.join(PROJECT_FILE);
        fs::write(&file, codec::encode(record)).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                Error::NotFound(project_name(path))
            } else {
                Error::PersistFailure {
                    path: path.to_path_buf(),
                    source: err,
                }
            }
        })
    }
}

/// Listing handle returned by [`ProjectRepository::list`]
///
/// Each [`iter`](ProjectList::iter) call re-reads the directory, so one
/// handle can be walked more than once.
pub struct ProjectList<'a> {
    repo: &'a ProjectRepository,
    root: PathBuf,
}

impl ProjectList<'_> {
    /// Iterate the records under the root, skipping entries that are not
    /// project directories with a decodable record
    pub fn iter(&self) -> ProjectListIter<'_> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => Some(entries),
            Err(err) => {
                debug!(root = %self.root.display(), error = %err, "Root not listable");
                None
            }
        };
        ProjectListIter {
            repo: self.repo,
            entries,
        }
    }
}

/// Iterator over one pass of a [`ProjectList`]
pub struct ProjectListIter<'a> {
    repo: &'a ProjectRepository,
    entries: Option<fs::ReadDir>,
}

impl Iterator for ProjectListIter<'_> {
    type Item = ProjectRecord;

    fn next(&mut self) -> Option<ProjectRecord> {
        let entries = self.entries.as_mut()?;
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(error = %err, "Directory entry not readable");
                    continue;
                }
            };
            if let Some(record) = self.repo.read(&entry.path()) {
                return Some(record);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Status;
    use tempfile::TempDir;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn repo_at(today: NaiveDate) -> ProjectRepository {
        ProjectRepository::new(ProjectDefaults::default(), today)
    }

    fn status_change(status: Status) -> ChangeSet {
        ChangeSet {
            status: Some(status),
            ..Default::default()
        }
    }

    #[test]
    fn create_writes_directory_and_record() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("foo");
        let today = date(2017, 1, 14);

        let record = repo_at(today)
            .create(&path, &status_change(Status::Active))
            .unwrap();

        assert_eq!(record.name, "foo");
        assert_eq!(record.status, Status::Active);
        assert_eq!(record.start_date, Some(today));
        assert_eq!(record.end_date, None);
        assert_eq!(record.colour, "-");

        let stored = fs::read_to_string(path.join(PROJECT_FILE)).unwrap();
        assert_eq!(codec::decode(&stored).unwrap(), record);
    }

    #[test]
    fn create_rejects_existing_directory() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("foo");
        fs::create_dir(&path).unwrap();

        let err = repo_at(date(2017, 1, 14))
            .create(&path, &ChangeSet::default())
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(name) if name == "foo"));
    }

    #[test]
    fn create_surfaces_persist_failure_for_missing_parent() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("missing").join("foo");

        let err = repo_at(date(2017, 1, 14))
            .create(&path, &ChangeSet::default())
            .unwrap_err();
        assert!(matches!(err, Error::PersistFailure { .. }));
    }

    #[test]
    fn read_missing_project_is_none() {
        let root = TempDir::new().unwrap();
        let repo = repo_at(date(2017, 1, 14));
        assert_eq!(repo.read(&root.path().join("ghost")), None);
    }

    #[test]
    fn read_corrupt_record_is_none() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("foo");
        fs::create_dir(&path).unwrap();
        fs::write(path.join(PROJECT_FILE), "status      : finished\n").unwrap();

        assert_eq!(repo_at(date(2017, 1, 14)).read(&path), None);
    }

    #[test]
    fn read_takes_the_name_from_the_directory() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("foo");
        fs::create_dir(&path).unwrap();
        fs::write(path.join(PROJECT_FILE), "name        : something-else\n").unwrap();

        let record = repo_at(date(2017, 1, 14)).read(&path).unwrap();
        assert_eq!(record.name, "foo");
    }

    #[test]
    fn update_completes_and_then_reproposes() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("foo");
        let started = date(2017, 1, 14);
        let finished = date(2017, 5, 2);

        repo_at(started)
            .create(&path, &status_change(Status::Active))
            .unwrap();

        let record = repo_at(finished)
            .update(&path, &status_change(Status::Complete))
            .unwrap();
        assert_eq!(record.status, Status::Complete);
        assert_eq!(record.start_date, Some(started));
        assert_eq!(record.end_date, Some(finished));

        let record = repo_at(finished)
            .update(&path, &status_change(Status::Proposed))
            .unwrap();
        assert_eq!(record.status, Status::Proposed);
        assert_eq!(record.start_date, None);
        assert_eq!(record.end_date, None);
    }

    #[test]
    fn update_initializes_a_bare_directory() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("foo");
        fs::create_dir(&path).unwrap();

        let changes = ChangeSet {
            description: Some("Found without a record".to_string()),
            ..Default::default()
        };
        let record = repo_at(date(2017, 1, 14)).update(&path, &changes).unwrap();
        assert_eq!(record.status, Status::Active);
        assert_eq!(record.description, "Found without a record");
        assert!(path.join(PROJECT_FILE).exists());
    }

    #[test]
    fn update_without_directory_is_not_found() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("ghost");

        let err = repo_at(date(2017, 1, 14))
            .update(&path, &ChangeSet::default())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(name) if name == "ghost"));
    }

    #[test]
    fn delete_removes_the_whole_directory() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("foo");
        let repo = repo_at(date(2017, 1, 14));
        repo.create(&path, &ChangeSet::default()).unwrap();
        fs::write(path.join("notes.txt"), "keepsake").unwrap();

        repo.delete(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(repo.read(&path), None);
    }

    #[test]
    fn delete_rejects_non_projects() {
        let root = TempDir::new().unwrap();
        let err = repo_at(date(2017, 1, 14))
            .delete(&root.path().join("ghost"))
            .unwrap_err();
        assert!(matches!(err, Error::NotAProject(name) if name == "ghost"));
    }

    #[test]
    fn list_yields_only_decodable_projects() {
        let root = TempDir::new().unwrap();
        let repo = repo_at(date(2017, 1, 14));
        repo.create(&root.path().join("foo"), &status_change(Status::Active))
            .unwrap();
        repo.create(&root.path().join("bar"), &status_change(Status::Proposed))
            .unwrap();

        fs::create_dir(root.path().join("no-record")).unwrap();
        fs::write(root.path().join("loose-file"), "not a directory").unwrap();
        let corrupt = root.path().join("corrupt");
        fs::create_dir(&corrupt).unwrap();
        fs::write(corrupt.join(PROJECT_FILE), "no separator here\n").unwrap();

        let list = repo.list(root.path());
        let mut names: Vec<String> = list.iter().map(|record| record.name).collect();
        names.sort();
        assert_eq!(names, ["bar", "foo"]);
    }

    #[test]
    fn list_can_be_walked_twice() {
        let root = TempDir::new().unwrap();
        let repo = repo_at(date(2017, 1, 14));
        repo.create(&root.path().join("foo"), &ChangeSet::default())
            .unwrap();

        let list = repo.list(root.path());
        assert_eq!(list.iter().count(), 1);
        assert_eq!(list.iter().count(), 1);
    }

    #[test]
    fn list_of_missing_root_is_empty() {
        let root = TempDir::new().unwrap();
        let repo = repo_at(date(2017, 1, 14));
        let list = repo.list(&root.path().join("nowhere"));
        assert_eq!(list.iter().count(), 0);
    }
}
