//! Loader for the RON tuning file at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{RUNNER_TUNING_SCHEMA, RunnerTuning};

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning from RON text. `file` is only used for error context.
pub fn parse_runner_tuning(contents: &str, file: &str) -> Result<RunnerTuning, ContentLoadError> {
    let tuning: RunnerTuning = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    if tuning.schema_version != RUNNER_TUNING_SCHEMA {
        return Err(ContentLoadError {
            file: file.to_string(),
            message: format!(
                "Unsupported schema_version {} (expected {})",
                tuning.schema_version, RUNNER_TUNING_SCHEMA
            ),
        });
    }

    Ok(tuning)
}

pub fn load_runner_tuning(path: &Path) -> Result<RunnerTuning, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    let tuning = parse_runner_tuning(&contents, &file_name)?;
    debug!("Parsed runner tuning from {}", file_name);
    Ok(tuning)
}
