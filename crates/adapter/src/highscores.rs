//! JSON file high-score store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::HighScoreStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreFile {
    best: u32,
}

/// Best score kept in a small JSON document (`{"best":1200}`)
#[derive(Debug, Clone)]
pub struct JsonFileHighScores {
    path: PathBuf,
}

impl JsonFileHighScores {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileHighScores {
    fn load_best(&mut self) -> Result<u32> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("reading {}", self.path.display())));
            }
        };
        let file: HighScoreFile = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(file.best)
    }

    fn save_best(&mut self, score: u32) -> Result<()> {
        let json = serde_json::to_string(&HighScoreFile { best: score })?;
        fs::write(&self.path, json).with_context(|| format!("writing {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("neon_tetris_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_reads_as_zero() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let mut store = JsonFileHighScores::new(&path);
        assert_eq!(store.load_best().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = JsonFileHighScores::new(&path);
        store.save_best(4_200).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"best":4200}"#);
        assert_eq!(store.load_best().unwrap(), 4_200);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        let mut store = JsonFileHighScores::new(&path);
        let err = store.load_best().unwrap_err();
        assert!(format!("{:#}", err).contains("parsing"));
        let _ = fs::remove_file(&path);
    }
}
