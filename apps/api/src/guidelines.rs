//! Clinical guideline text embedded in the chat, evaluation and initial-guidance prompts.
//!
//! Loaded once at startup and shared read-only through `AppState`.

use std::path::Path;

use anyhow::{bail, Context, Result};

pub const PART1_FILE: &str = "guideline_part1.txt";
pub const PART2_FILE: &str = "guideline_part2.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guidelines {
    part1: String,
    part2: String,
}

impl Guidelines {
    /// Reads both guideline files from `dir`. Fails if either is missing, unreadable or blank.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            part1: read_part(&dir.join(PART1_FILE))?,
            part2: read_part(&dir.join(PART2_FILE))?,
        })
    }

    #[cfg(test)]
    pub fn from_parts(part1: impl Into<String>, part2: impl Into<String>) -> Self {
        Self {
            part1: part1.into(),
            part2: part2.into(),
        }
    }

    pub fn part1(&self) -> &str {
        &self.part1
    }

    pub fn part2(&self) -> &str {
        &self.part2
    }

    /// Total size in bytes, for startup logging.
    pub fn byte_len(&self) -> usize {
        self.part1.len() + self.part2.len()
    }
}

fn read_part(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read guideline file '{}'", path.display()))?;
    if text.trim().is_empty() {
        bail!("Guideline file '{}' is empty", path.display());
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_parts(dir: &Path, part1: &str, part2: &str) {
        std::fs::write(dir.join(PART1_FILE), part1).unwrap();
        std::fs::write(dir.join(PART2_FILE), part2).unwrap();
    }

    #[test]
    fn test_load_keeps_content_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        write_parts(dir.path(), "第1部\n  HbA1c 7.0%未満\n", "第2部\n");

        let g = Guidelines::load(dir.path()).unwrap();
        assert_eq!(g.part1(), "第1部\n  HbA1c 7.0%未満\n");
        assert_eq!(g.part2(), "第2部\n");
        assert_eq!(g.byte_len(), g.part1().len() + g.part2().len());
    }

    #[test]
    fn test_load_fails_when_part_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PART1_FILE), "only part one").unwrap();

        let err = Guidelines::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains(PART2_FILE));
    }

    #[test]
    fn test_load_fails_when_part_blank() {
        let dir = tempfile::tempdir().unwrap();
        write_parts(dir.path(), "content", " \n\t");

        let err = Guidelines::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn test_bundled_guidelines_load_from_default_dir() {
        let dir = Path::new(crate::config::DEFAULT_GUIDELINE_DIR);
        assert!(dir.is_absolute());
        assert!(Guidelines::load(dir).is_ok());
    }

    #[test]
    fn test_load_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Guidelines::load(&dir.path().join("nope")).is_err());
    }
}
