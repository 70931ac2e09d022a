//! Profile discovery: lists export files that look like account snapshots,
//! newest first, with a human-readable label.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::data::profile::value_as_i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileListing {
    pub label: String,
    pub path: PathBuf,
}

/// Lists `*.json` files in `dir` that carry a non-empty `wizard_info`, newest first.
/// A missing directory yields an empty list; unreadable files are skipped.
pub fn find_profiles(dir: impl AsRef<Path>) -> Vec<ProfileListing> {
    let dir = dir.as_ref();
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<(PathBuf, SystemTime)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .filter_map(|path| {
            let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
            Some((path, modified))
        })
        .collect();
    files.sort_by(|a, b| b.1.cmp(&a.1));

    files
        .into_iter()
        .filter_map(|(path, modified)| {
            let label = describe_profile(&path, modified);
            if label.is_none() {
                debug!(path = %path.display(), "skipping file without wizard_info");
            }
            label.map(|label| ProfileListing { label, path })
        })
        .collect()
}

fn describe_profile(path: &Path, modified: SystemTime) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let data: Value = serde_json::from_str(&raw).ok()?;
    let wizard = data.get("wizard_info")?.as_object()?;
    if wizard.is_empty() {
        return None;
    }
    let name = wizard
        .get("wizard_name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or("(unknown)");
    let id = wizard
        .get("wizard_id")
        .and_then(value_as_i64)
        .map_or_else(|| "?".to_string(), |id| id.to_string());
    let level = wizard
        .get("wizard_level")
        .and_then(value_as_i64)
        .map_or_else(|| "?".to_string(), |lvl| lvl.to_string());
    let stamp = DateTime::<Local>::from(modified).format("%Y-%m-%d %H:%M:%S");
    let file_name = path.file_name()?.to_string_lossy();
    Some(format!("{name} [{id}] Lv{level} — {stamp} — {file_name}"))
}

#[cfg(test)]
mod tests {
    use std::time::UNIX_EPOCH;

    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("runeview-{name}-{stamp}"));
        fs::create_dir_all(&dir).expect("temp dir should be created");
        dir
    }

    #[test]
    fn lists_only_exports_with_wizard_info() {
        let dir = temp_dir("profiles");
        fs::write(
            dir.join("main.json"),
            r#"{"wizard_info":{"wizard_id":42,"wizard_name":"Hana","wizard_level":50}}"#,
        )
        .unwrap();
        fs::write(dir.join("other.json"), r#"{"unit_list":[]}"#).unwrap();
        fs::write(dir.join("broken.json"), "{not json").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let listings = find_profiles(&dir);
        assert_eq!(listings.len(), 1);
        assert!(listings[0].label.starts_with("Hana [42] Lv50 — "));
        assert!(listings[0].label.ends_with("— main.json"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_directory_is_empty() {
        assert!(find_profiles("/definitely/not/here").is_empty());
    }
}
