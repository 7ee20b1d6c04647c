use std::path::Path;

pub const MAX_TITLE_LENGTH: usize = 128;
const TITLE_KEEP: usize = 62;

/// Window title of an imported stack: the file name, plus the series name
/// when the source holds several series.
pub fn stack_title(file: &str, series_name: Option<&str>, series_count: usize) -> String {
    let mut title = Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
        .to_string();

    if let Some(name) = series_name.map(str::trim).filter(|name| !name.is_empty()) {
        if series_count > 1 && !file.ends_with(name) {
            title.push_str(" - ");
            title.push_str(name);
        }
    }

    let length = title.chars().count();
    if length > MAX_TITLE_LENGTH {
        let head = title.chars().take(TITLE_KEEP).collect::<String>();
        let tail = title.chars().skip(length - TITLE_KEEP).collect::<String>();
        title = format!("{head}...{tail}");
    }
    title
}
