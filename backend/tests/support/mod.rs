#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// The single-entry document used by the `403` scenarios.
pub const CLASS_403: &str = r#"{"className":"403","note":"","schedule":[{"date":"03/02","weekday":"一","period":"P1","content":"上課"}]}"#;

/// Runs `f` with process environment variables set (`Some`) or removed
/// (`None`), restoring the previous values afterwards, even on panic.
///
/// Callers are serialized since the environment is process-global.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::apply(changes);
    f()
}

struct EnvRestore {
    previous: BTreeMap<String, Option<String>>,
}

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let mut previous = BTreeMap::new();
        for (key, value) in changes {
            previous
                .entry(key.to_string())
                .or_insert_with(|| std::env::var(key).ok());
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
        Self { previous }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in std::mem::take(&mut self.previous) {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

/// Fresh data directory holding the given `(classId, json)` documents.
pub fn data_dir_with(documents: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (class_id, json) in documents {
        write_document(dir.path(), class_id, json);
    }
    dir
}

pub fn write_document(dir: &Path, class_id: &str, json: &str) {
    std::fs::write(dir.join(format!("{}.json", class_id)), json).unwrap();
}

pub fn read_document(dir: &Path, class_id: &str) -> String {
    std::fs::read_to_string(dir.join(format!("{}.json", class_id))).unwrap()
}

/// File names in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
