//! The question bank file.

use std::path::{Path, PathBuf};

use log::{info, warn};
use qk_engine::Difficulty;
use qk_engine::question::{Question, retain_valid, sample_questions};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::fsutil::{read_json, write_json_atomic};

/// Loads the question bank, regenerating the sample set when needed.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    /// Create a store over the configured question file.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            path: config.questions_path(),
        }
    }

    /// Path of the question file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every valid question.
    ///
    /// A missing or unreadable file, or one with no valid records, is
    /// replaced by the built-in sample set, which is also returned.
    pub fn load(&self) -> StoreResult<Vec<Question>> {
        let raw = match read_json(&self.path) {
            Ok(raw) => raw,
            Err(StoreError::Json(e)) => {
                warn!("{} is not valid JSON ({e})", self.path.display());
                None
            }
            Err(e) => return Err(e),
        };

        let questions = raw.as_ref().map(parse_questions).unwrap_or_default();
        if !questions.is_empty() {
            info!("loaded {} questions from {}", questions.len(), self.path.display());
            return Ok(questions);
        }

        warn!("no valid questions in {}, writing samples", self.path.display());
        let samples = sample_questions();
        if let Err(e) = write_json_atomic(&self.path, &samples) {
            warn!("could not write sample questions: {e}");
        }
        Ok(samples)
    }

    /// Overwrite the question file with the built-in sample set.
    pub fn write_samples(&self) -> StoreResult<usize> {
        let samples = sample_questions();
        write_json_atomic(&self.path, &samples)?;
        info!("wrote {} sample questions to {}", samples.len(), self.path.display());
        Ok(samples.len())
    }
}

/// Leniently parse a question file.
///
/// Records that are not objects, lack a prompt, have fewer than two string
/// options, or whose answer is not an option are skipped. Unknown or
/// missing difficulty tags become `medium`.
pub fn parse_questions(raw: &Value) -> Vec<Question> {
    let Some(records) = raw.as_array() else {
        return Vec::new();
    };
    retain_valid(records.iter().filter_map(parse_record).collect())
}

fn parse_record(record: &Value) -> Option<Question> {
    let fields = record.as_object()?;
    let prompt = fields.get("question")?.as_str()?.trim();
    let answer = fields.get("answer")?.as_str()?.trim();
    let options = fields
        .get("options")?
        .as_array()?
        .iter()
        .map(|o| o.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;

    if prompt.is_empty() || answer.is_empty() || options.len() < 2 {
        return None;
    }
    if !options.iter().any(|o| o == answer) {
        return None;
    }

    let tag = fields
        .get("difficulty")
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .unwrap_or_default();
    let difficulty = Difficulty::question_tiers()
        .iter()
        .copied()
        .find(|d| d.as_str() == tag)
        .unwrap_or(Difficulty::Medium);

    Some(Question::new(prompt, options, answer, difficulty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn store() -> (TempDir, QuestionStore) {
        let dir = TempDir::new().unwrap();
        let store = QuestionStore::new(&StoreConfig::new(dir.path()));
        (dir, store)
    }

    #[test]
    fn missing_file_writes_samples() {
        let (_dir, store) = store();
        let questions = store.load().unwrap();
        assert_eq!(questions.len(), 8);
        assert!(store.path().is_file());
        assert_eq!(store.load().unwrap(), questions);
    }

    #[test]
    fn garbage_file_is_replaced_by_samples() {
        let (_dir, store) = store();
        fs::write(store.path(), "[{]").unwrap();
        assert_eq!(store.load().unwrap(), sample_questions());
    }

    #[test]
    fn undecodable_file_is_replaced_by_samples() {
        let (_dir, store) = store();
        fs::write(store.path(), b"[\xff]").unwrap();
        assert_eq!(store.load().unwrap(), sample_questions());
    }

    #[test]
    fn file_without_valid_records_is_replaced() {
        let (_dir, store) = store();
        fs::write(store.path(), r#"[{"question": "", "options": [], "answer": ""}]"#).unwrap();
        assert_eq!(store.load().unwrap().len(), 8);
    }

    #[test]
    fn lenient_parse_skips_and_coerces() {
        let raw = json!([
            {"question": " Sky? ", "options": ["Blue", "Red"], "answer": "Blue ", "difficulty": "EASY"},
            {"question": "Tag?", "options": ["a", "b"], "answer": "a", "difficulty": "random"},
            {"question": "No tag?", "options": ["a", "b"], "answer": "b"},
            {"question": "Bad answer", "options": ["a", "b"], "answer": "c"},
            {"question": "One option", "options": ["a"], "answer": "a"},
            {"question": "Numbers", "options": [1, 2], "answer": "1"},
            "not an object"
        ]);
        let questions = parse_questions(&raw);
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].prompt, "Sky?");
        assert_eq!(questions[0].answer, "Blue");
        assert_eq!(questions[0].difficulty, Difficulty::Easy);
        assert_eq!(questions[1].difficulty, Difficulty::Medium);
        assert_eq!(questions[2].difficulty, Difficulty::Medium);
    }

    #[test]
    fn non_array_parses_to_nothing() {
        assert!(parse_questions(&json!({"question": "x"})).is_empty());
    }

    #[test]
    fn write_samples_overwrites() {
        let (_dir, store) = store();
        fs::write(
            store.path(),
            r#"[{"question": "Only?", "options": ["a", "b"], "answer": "a", "difficulty": "easy"}]"#,
        )
        .unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
        assert_eq!(store.write_samples().unwrap(), 8);
        assert_eq!(store.load().unwrap().len(), 8);
    }
}
