use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Lightweight catalog search result; the full record is fetched per item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemStub {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

fn empty_data() -> Value {
    Value::Object(serde_json::Map::new())
}

/// One exported portal item, serialized as a single JSONL line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "empty_data")]
    pub data: Value,
}

#[derive(Debug, Clone, Default)]
pub struct DumpSummary {
    pub found: usize,
    pub written: usize,
    pub skipped: usize,
    pub output_path: PathBuf,
}
