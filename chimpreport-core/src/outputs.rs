use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Declared outputs as `(output key, response key)` pairs, in emission order.
pub const OUTPUTS: &[(&str, &str)] = &[
    ("id", "id"),
    ("type", "type"),
    ("create_time", "create_time"),
    ("archive_url", "archive_url"),
    ("status", "status"),
    ("emails_sent", "emails_sent"),
    ("report_summary", "report_summary"),
    ("_links", "_links"),
];

/// The normalized record handed back to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CampaignReport(Map<String, JsonValue>);

impl CampaignReport {
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.0)
    }
}

/// Copy each declared output that is present in `body`. Non-object bodies project to nothing.
pub fn project(body: &JsonValue) -> CampaignReport {
    let mut out = Map::new();
    if let JsonValue::Object(source) = body {
        for (output_key, source_key) in OUTPUTS {
            if let Some(v) = source.get(*source_key) {
                out.insert((*output_key).to_string(), v.clone());
            }
        }
    }
    CampaignReport(out)
}
