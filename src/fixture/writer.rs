use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::document::FixtureDocument;
use super::error::FixtureError;

const INDENT: &[u8] = b"    ";

/// Renders a document as 4-space indented JSON with keys sorted at every
/// level, followed by a newline.
pub fn to_fixture_json(document: &FixtureDocument) -> Result<Vec<u8>, FixtureError> {
    let value = sort_keys(serde_json::to_value(document)?);

    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}

pub fn write_fixture(path: &Path, document: &FixtureDocument) -> Result<(), FixtureError> {
    let bytes = to_fixture_json(document)?;
    fs::write(path, bytes).map_err(|e| FixtureError::io(path, e))
}

/// Rebuilds objects in key order so the output does not depend on the map
/// type behind `serde_json::Value`.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
