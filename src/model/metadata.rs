use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SeriesInfo;

/// Flat key/value table of the source's original metadata.
///
/// Keys sort lexicographically; core series values carry a leading space so
/// they come first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OriginalMetadata {
    entries: BTreeMap<String, Value>,
}

impl OriginalMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn merge_prefixed(&mut self, source: &BTreeMap<String, String>, prefix: &str) {
        for (key, value) in source {
            self.insert(format!("{prefix}{key}"), value.clone());
        }
    }

    pub fn add_core_values(&mut self, prefix: &str, info: &SeriesInfo) {
        let pad = " ";
        let key = |name: &str| format!("{pad}{prefix}{name}");
        self.insert(key("SizeX"), info.size_x);
        self.insert(key("SizeY"), info.size_y);
        self.insert(key("SizeZ"), info.size_z);
        self.insert(key("SizeT"), info.size_t);
        self.insert(key("SizeC"), info.size_c);
        self.insert(key("IsRGB"), info.is_rgb());
        self.insert(key("PixelType"), info.pixel_kind.name());
        self.insert(key("DimensionOrder"), info.dimension_order.to_string());
        self.insert(key("IsIndexed"), info.indexed);
    }

    /// Key prefix for one series: its name, or `Series NN ` zero-padded to
    /// the width of `series_count` when several series share the table.
    pub fn series_prefix(name: Option<&str>, series: usize, series_count: usize) -> String {
        match name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => format!("{name} "),
            None if series_count > 1 => {
                let width = digits(series_count);
                format!("Series {:0width$} ", series + 1)
            }
            None => String::new(),
        }
    }

    pub fn to_lines(&self, separator: &str) -> String {
        let mut output = String::new();
        for (key, value) in &self.entries {
            output.push_str(key);
            output.push_str(separator);
            match value {
                Value::String(text) => output.push_str(text),
                other => output.push_str(&other.to_string()),
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for OriginalMetadata {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.to_lines(" = "))
    }
}

fn digits(mut value: usize) -> usize {
    let mut digits = 0;
    while value > 0 {
        value /= 10;
        digits += 1;
    }
    digits
}
