pub mod plan;

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::constants::{DATE_FORMAT, TASK_FILE_INDENT};

pub use plan::ReviewPlan;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("corrupt task file {}: {reason}", .path.display())]
    CorruptState { path: PathBuf, reason: String },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Self::CorruptState {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// File-backed review plan.
///
/// Holds the plan loaded at open time; `save` writes the whole mapping to a
/// sibling `.tmp` file and renames it over the target, so a reader never sees
/// a truncated file.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    plan: ReviewPlan,
}

impl TaskStore {
    /// Opens the store at `path`, loading an empty plan if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let plan = load_plan(&path)?;
        tracing::info!(path = %path.display(), dates = plan.len(), "Task store loaded");
        Ok(Self { path, plan })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the persisted plan without touching the in-memory copy.
    pub fn load(&self) -> Result<ReviewPlan, StoreError> {
        load_plan(&self.path)
    }

    /// Persists `plan` and adopts it as the in-memory plan.
    ///
    /// The in-memory plan is replaced even when the write fails: the running
    /// process keeps the newest state and the error tells the caller the
    /// durable copy is stale.
    pub fn save(&mut self, plan: ReviewPlan) -> Result<(), StoreError> {
        self.plan = plan;
        self.flush()
    }

    /// Writes the current in-memory plan to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        let bytes = encode_plan(&self.plan)?;
        write_atomic(&self.path, &bytes)?;
        tracing::info!(path = %self.path.display(), dates = self.plan.len(), "Task store saved");
        Ok(())
    }

    pub fn plan(&self) -> &ReviewPlan {
        &self.plan
    }

    pub fn get(&self, date: NaiveDate) -> &[String] {
        self.plan.get(date)
    }

    /// Replaces the list for `date` in memory; call `flush` to persist.
    pub fn put(&mut self, date: NaiveDate, topics: Vec<String>) {
        self.plan.put(date, topics);
    }
}

fn load_plan(path: &Path) -> Result<ReviewPlan, StoreError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ReviewPlan::new()),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    decode_plan(path, &raw)
}

fn decode_plan(path: &Path, raw: &[u8]) -> Result<ReviewPlan, StoreError> {
    let days: BTreeMap<String, Vec<String>> =
        serde_json::from_slice(raw).map_err(|e| StoreError::corrupt(path, e.to_string()))?;

    let mut parsed = Vec::with_capacity(days.len());
    for (key, topics) in days {
        let date = NaiveDate::parse_from_str(&key, DATE_FORMAT)
            .map_err(|e| StoreError::corrupt(path, format!("invalid date key '{key}': {e}")))?;
        // Only the zero-padded spelling is accepted, so no two keys share a date.
        if date.format(DATE_FORMAT).to_string() != key {
            return Err(StoreError::corrupt(
                path,
                format!("date key '{key}' is not in YYYY-MM-DD form"),
            ));
        }
        parsed.push((date, topics));
    }

    let (plan, normalized) = ReviewPlan::from_days(parsed);
    if normalized {
        tracing::warn!(
            path = %path.display(),
            "Task file contained duplicate topics or empty days; normalized on load"
        );
    }
    Ok(plan)
}

fn encode_plan(plan: &ReviewPlan) -> Result<Vec<u8>, StoreError> {
    let days: BTreeMap<String, &[String]> = plan
        .iter()
        .map(|(date, topics)| (date.format(DATE_FORMAT).to_string(), topics))
        .collect();

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(TASK_FILE_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    days.serialize(&mut serializer)?;
    Ok(buf)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let tmp = tmp_path(path);
    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::io(&tmp, e));
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StoreError::io(path, e)
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempdir().unwrap();
        let store = TaskStore::open(dir.path().join("tasks.json")).unwrap();
        assert!(store.plan().is_empty());
    }

    #[test]
    fn save_then_load_reconstructs_plan() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::open(&path).unwrap();

        let mut plan = ReviewPlan::new();
        plan.put(date(2024, 1, 1), vec!["Topic A".to_string()]);
        plan.put(
            date(2024, 1, 2),
            vec!["Topic A".to_string(), "Topic B".to_string()],
        );
        store.save(plan.clone()).unwrap();

        let reopened = TaskStore::open(&path).unwrap();
        assert_eq!(reopened.plan(), &plan);
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn file_layout_is_date_keyed_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.put(date(2024, 1, 2), vec!["Topic A".to_string()]);
        store.flush().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"2024-01-02\": [\n        \"Topic A\"\n    ]\n}");
    }

    #[test]
    fn malformed_json_is_corrupt_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap();

        let err = TaskStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptState { .. }));
    }

    #[test]
    fn wrong_shape_is_corrupt_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, r#"{"2024-01-01": "Topic A"}"#).unwrap();
        assert!(matches!(
            TaskStore::open(&path).unwrap_err(),
            StoreError::CorruptState { .. }
        ));

        fs::write(&path, r#"["2024-01-01"]"#).unwrap();
        assert!(matches!(
            TaskStore::open(&path).unwrap_err(),
            StoreError::CorruptState { .. }
        ));
    }

    #[test]
    fn invalid_date_key_is_corrupt_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, r#"{"someday": ["Topic A"]}"#).unwrap();

        let err = TaskStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("someday"));
    }

    #[test]
    fn unpadded_date_key_is_corrupt_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, r#"{"2024-01-01": ["A"], "2024-1-1": ["B"]}"#).unwrap();

        let err = TaskStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptState { .. }));
        assert!(err.to_string().contains("2024-1-1"));
    }

    #[test]
    fn load_normalizes_duplicates_and_empty_days() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"{"2024-01-01": ["A", "A"], "2024-01-02": []}"#,
        )
        .unwrap();

        let store = TaskStore::open(&path).unwrap();
        assert_eq!(store.get(date(2024, 1, 1)), ["A".to_string()]);
        assert!(!store.plan().has_topics(date(2024, 1, 2)));
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("tasks.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.put(date(2024, 3, 1), vec!["X".to_string()]);
        store.flush().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.put(date(2024, 1, 1), vec!["A".to_string()]);
        store.flush().unwrap();
        let before = fs::read(&path).unwrap();

        // A directory squatting on the temp path makes the write fail.
        fs::create_dir(tmp_path(&path)).unwrap();
        store.put(date(2024, 1, 2), vec!["B".to_string()]);
        let err = store.flush().unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(fs::read(&path).unwrap(), before);
        assert!(store.plan().has_topics(date(2024, 1, 2)));
    }
}
