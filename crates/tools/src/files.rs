use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use maze_core::{Question, QuestionCatalog, SessionConfig};

/// Reads a TOML session config. Missing keys fall back to the defaults; the result is
/// validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: SessionConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    config.validate().with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(config)
}

/// Reads a JSON array of questions; without a path the built-in catalog is used.
pub fn load_catalog(path: Option<&Path>) -> Result<QuestionCatalog> {
    let Some(path) = path else {
        return Ok(QuestionCatalog::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;
    let questions: Vec<Question> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse question file: {}", path.display()))?;
    QuestionCatalog::new(questions)
        .with_context(|| format!("invalid question catalog in {}", path.display()))
}
