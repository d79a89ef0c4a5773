//! JSON export of a single training.
//!
//! Documents are pretty-printed with two-space indentation and keep the key
//! order `id`, `name`, `exercises` so they match files written by earlier
//! versions of the form.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::model::Training;

const DEFAULT_FILE_STEM: &str = "training";

pub fn to_json(training: &Training) -> Result<String> {
    serde_json::to_string_pretty(training).context("Failed to serialize training")
}

/// `<name>.json`, or `training.json` for a nameless training. Path separators
/// in the name are replaced so the file always lands in the target directory.
pub fn file_name(training: &Training) -> String {
    let stem = if training.name().is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        training
            .name()
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0' => '_',
                c => c,
            })
            .collect()
    };
    format!("{stem}.json")
}

pub fn write_to_dir(training: &Training, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = dir.as_ref().join(file_name(training));
    let json = to_json(training)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Exported training {} to {}", training.id(), path.display());
    Ok(path)
}

pub fn read_training(path: impl AsRef<Path>) -> Result<Training> {
    let path = path.as_ref();
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("{} is not a training export", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Exercise;
    use pretty_assertions::assert_eq;

    fn push_day() -> Training {
        Training::new(
            "1700000000000".to_string(),
            "Push Day".to_string(),
            vec![
                Exercise::new("Bench Press", 3, 10, 20.0),
                Exercise::new("Lateral Raise", 4, 12, 7.5),
            ],
        )
    }

    #[test]
    fn json_shape_matches_previous_exports() {
        let expected = r#"{
  "id": "1700000000000",
  "name": "Push Day",
  "exercises": [
    {
      "name": "Bench Press",
      "sets": 3,
      "reps": 10,
      "weight": 20
    },
    {
      "name": "Lateral Raise",
      "sets": 4,
      "reps": 12,
      "weight": 7.5
    }
  ]
}"#;
        assert_eq!(to_json(&push_day()).unwrap(), expected);
    }

    #[test]
    fn file_names() {
        assert_eq!(file_name(&push_day()), "Push Day.json");
        let nameless = Training::new("1".into(), String::new(), vec![]);
        assert_eq!(file_name(&nameless), "training.json");
        let nested = Training::new("2".into(), "legs/arms".into(), vec![]);
        assert_eq!(file_name(&nested), "legs_arms.json");
    }

    #[test]
    fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let training = push_day();

        let path = write_to_dir(&training, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("Push Day.json"));
        assert_eq!(read_training(&path).unwrap(), training);
    }

    #[test]
    fn read_rejects_other_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, r#"{"title":"not a training"}"#).unwrap();

        let err = read_training(&path).unwrap_err();
        assert!(err.to_string().contains("is not a training export"));
        assert!(read_training(dir.path().join("missing.json")).is_err());
    }
}
