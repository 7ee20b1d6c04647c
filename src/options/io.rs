use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use super::{ImportOptions, Result};

pub(crate) fn is_yaml(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    matches!(extension.as_str(), "yaml" | "yml")
}

pub fn load_options(path: impl AsRef<Path>) -> Result<ImportOptions> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let options = if is_yaml(path) {
        serde_yaml::from_str::<ImportOptions>(&raw)?
    } else {
        serde_json::from_str::<ImportOptions>(&raw)?
    };
    options.validate()?;
    debug!(path = %path.display(), series = options.series.len(), "load_options");
    Ok(options)
}

/// Writes `value` as YAML for `.yaml`/`.yml` paths, pretty JSON otherwise.
pub fn save_document<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    fs::write(path, serialized)?;
    Ok(())
}
