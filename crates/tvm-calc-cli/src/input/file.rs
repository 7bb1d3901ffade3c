use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{CliError, Result};

/// Read a JSON file and deserialise into a typed input struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical).map_err(|e| CliError::InputFile {
        path: canonical.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| CliError::InputFile {
        path: canonical.display().to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

fn resolve_path(path: &str) -> Result<PathBuf> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.is_file() {
        return Err(CliError::InputFile {
            path: canonical.display().to_string(),
            reason: "not found or not a regular file".into(),
        });
    }

    Ok(canonical)
}
