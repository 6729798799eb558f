use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::domain::{ApodRecord, ResultSet};
use crate::errors::{ApodError, ApodResult};

const INDENT: &[u8] = b"    ";

/// Write the result set as an indented JSON array, replacing any previous file
pub fn write_result_set(path: &Path, records: &ResultSet) -> ApodResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut serializer)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    fs::write(tmp_path, &buf)?;
    if let Err(e) = fs::rename(tmp_path, path) {
        fs::remove_file(tmp_path).ok();
        return Err(e.into());
    }

    tracing::debug!(path = %path.display(), records = records.len(), "Wrote result set");
    Ok(())
}

/// Load a previously written result set, skipping entries that fail validation
pub fn read_result_set(path: &Path) -> ApodResult<ResultSet> {
    let content = fs::read_to_string(path)?;

    let items = match serde_json::from_str::<Value>(&content)? {
        Value::Array(items) => items,
        _ => {
            return Err(ApodError::UnexpectedPayload(format!(
                "{} does not contain a JSON array",
                path.display()
            )))
        }
    };

    let mut records = ResultSet::new();
    for (index, item) in items.into_iter().enumerate() {
        match ApodRecord::from_value(item) {
            Ok(record) => {
                records.push(record);
            }
            Err(e) => tracing::warn!(index, error = %e, "Skipping malformed record"),
        }
    }

    Ok(records)
}
