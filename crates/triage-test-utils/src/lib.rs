//! Testing utilities for the triage workspace
//!
//! Shared fixtures: a small troubleshooting dataset with conventional
//! column names, and helpers to build records by hand.

#![allow(missing_docs)]

use serde_json::{json, Value};
use triage_dataset::Record;

/// Conventional column names, in the order fixtures emit them
pub const COLUMNS: [&str; 8] = [
    "Symptom code",
    "Symptom",
    "Category",
    "Sub issue",
    "Support action",
    "Actions for field",
    "Spare part",
    "SOP",
];

/// Fixture dataset as a `{ "rows": [...] }` document
pub const SAMPLE_DATASET: &str = r#"{
  "rows": [
    { "Symptom code": "S-1", "Symptom": "Unit does not start", "Category": "Electrical",
      "Sub issue": "Power supply", "Support action": "Check mains voltage at terminal block",
      "Actions for field": "2_Replace fuse F1", "Spare part": "Fuse 5A", "SOP": "https://sop.example/power" },
    { "Symptom code": "S-1", "Symptom": "Unit does not start", "Category": "Electrical",
      "Sub issue": "Power supply", "Support action": "Check mains voltage at terminal block",
      "Actions for field": "1_Measure voltage on L1/N", "Spare part": "/", "SOP": "https://sop.example/power" },
    { "Symptom code": "S-2", "Symptom": "Water leak under unit", "Category": "Hydraulic",
      "Sub issue": "Drain", "Support action": "Inspect drain pan",
      "Actions for field": "2_Flush drain line", "Spare part": "/", "SOP": "/" },
    { "Symptom code": "S-1", "Symptom": "Unit will not power up", "Category": "Electrical",
      "Sub issue": "Controller", "Support action": "Check controller display",
      "Actions for field": "1_Reset controller", "Spare part": "/", "SOP": "I" },
    { "Symptom code": "S-1", "Symptom": "Unit does not start", "Category": "Electrical",
      "Sub issue": "Controller", "Support action": " / ",
      "Actions for field": "3_Replace controller board", "Spare part": "Board CB-2", "SOP": "/" },
    { "Symptom code": "S-2", "Symptom": "Water leak under unit", "Category": "Hydraulic",
      "Sub issue": "Drain", "Support action": "Inspect drain pan",
      "Actions for field": "1_Clean drain pan", "Spare part": "/", "SOP": "/" },
    { "Symptom code": "S-1", "Symptom": "Unit does not start", "Category": "Electrical",
      "Sub issue": "Controller", "Support action": "Check sensor wiring",
      "Actions for field": "", "Spare part": "/", "SOP": "" },
    { "Symptom code": "S-10", "Symptom": "Noisy fan", "Category": "Mechanical",
      "Sub issue": "", "Support action": "Listen for bearing noise",
      "Actions for field": "Replace fan motor", "Spare part": " Fan motor FM-20 ", "SOP": " i " }
  ]
}"#;

/// Records of [`SAMPLE_DATASET`], in document order
#[must_use]
pub fn sample_records() -> Vec<Record> {
    let value: Value = serde_json::from_str(SAMPLE_DATASET).unwrap();
    value["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_object().cloned().unwrap())
        .collect()
}

/// Build a record from string cells, keeping the given key order
#[must_use]
pub fn record(cells: &[(&str, &str)]) -> Record {
    cells
        .iter()
        .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
        .collect()
}

/// One fixture row using [`COLUMNS`]
#[derive(Debug, Clone, Default)]
pub struct FixtureRow {
    pub id: String,
    pub desc: String,
    pub sub: String,
    pub support: String,
    pub action: String,
    pub spare: String,
    pub sop: String,
}

impl FixtureRow {
    #[must_use]
    pub fn new(id: &str, desc: &str) -> Self {
        Self {
            id: id.to_string(),
            desc: desc.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sub(mut self, sub: &str) -> Self {
        self.sub = sub.to_string();
        self
    }

    #[must_use]
    pub fn support(mut self, support: &str) -> Self {
        self.support = support.to_string();
        self
    }

    #[must_use]
    pub fn action(mut self, action: &str) -> Self {
        self.action = action.to_string();
        self
    }

    #[must_use]
    pub fn spare(mut self, spare: &str) -> Self {
        self.spare = spare.to_string();
        self
    }

    #[must_use]
    pub fn sop(mut self, sop: &str) -> Self {
        self.sop = sop.to_string();
        self
    }

    #[must_use]
    pub fn into_record(self) -> Record {
        record(&[
            (COLUMNS[0], &self.id),
            (COLUMNS[1], &self.desc),
            (COLUMNS[2], "General"),
            (COLUMNS[3], &self.sub),
            (COLUMNS[4], &self.support),
            (COLUMNS[5], &self.action),
            (COLUMNS[6], &self.spare),
            (COLUMNS[7], &self.sop),
        ])
    }
}

/// Render fixture rows as a plain-list dataset document
#[must_use]
pub fn dataset_json(rows: Vec<FixtureRow>) -> String {
    let records: Vec<Value> = rows
        .into_iter()
        .map(|r| Value::Object(r.into_record()))
        .collect();
    json!(records).to_string()
}
