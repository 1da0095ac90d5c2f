//! Dataset document shapes
//!
//! A dataset document is accepted in one of three shapes, tried in order:
//! a plain list of records, an object whose `rows` member is a list, or
//! an object whose own values are the records.

use crate::error::DatasetError;
use crate::fingerprint::DatasetFingerprint;
use crate::record::Record;
use serde::Serialize;
use serde_json::Value;

/// Which accepted shape a document had
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetShape {
    /// Top-level list of records
    List,
    /// Object with a `rows` list
    Rows,
    /// Object whose values are the records
    Values,
}

/// Decoded dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Records in document order
    pub records: Vec<Record>,
    /// Shape the document was recognized as
    pub shape: DatasetShape,
    /// Fingerprint of the raw document text
    pub fingerprint: DatasetFingerprint,
}

/// Decode a dataset document from JSON text
///
/// # Errors
/// Returns [`DatasetError`] if the text is not JSON, the top-level value
/// has no accepted shape, or an entry is not an object.
pub fn parse_document(text: &str) -> Result<Dataset, DatasetError> {
    let value: Value = serde_json::from_str(text)?;
    let (records, shape) = records_from_value(value)?;
    Ok(Dataset {
        records,
        shape,
        fingerprint: DatasetFingerprint::compute(text.as_bytes()),
    })
}

/// Extract records from an already-parsed document
///
/// # Errors
/// Returns [`DatasetError`] if the value has no accepted shape or an
/// entry is not an object.
pub fn records_from_value(value: Value) -> Result<(Vec<Record>, DatasetShape), DatasetError> {
    match value {
        Value::Array(items) => Ok((collect_indexed(items, "")?, DatasetShape::List)),
        Value::Object(mut map) => {
            if matches!(map.get("rows"), Some(Value::Array(_))) {
                if let Some(Value::Array(items)) = map.remove("rows") {
                    return Ok((collect_indexed(items, "rows")?, DatasetShape::Rows));
                }
            }
            let records = map
                .into_iter()
                .map(|(key, item)| into_record(item, key))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((records, DatasetShape::Values))
        }
        other => Err(DatasetError::UnrecognizedShape {
            found: kind_of(&other),
        }),
    }
}

fn collect_indexed(items: Vec<Value>, prefix: &str) -> Result<Vec<Record>, DatasetError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| into_record(item, format!("{prefix}[{i}]")))
        .collect()
}

fn into_record(item: Value, position: String) -> Result<Record, DatasetError> {
    match item {
        Value::Object(record) => Ok(record),
        other => Err(DatasetError::not_a_record(position, kind_of(&other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
