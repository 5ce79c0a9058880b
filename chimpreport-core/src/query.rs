//! Query-string rules. The API wants list parameters as one flat comma list, not repeated keys.

use crate::inputs::{CampaignReportInputs, EXCLUDE_FIELDS, FIELDS};

/// Trim each element and drop the ones left blank.
pub fn trim_list<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn flatten_list<S: AsRef<str>>(items: &[S]) -> String {
    trim_list(items).join(",")
}

/// Query parameters for everything but `campaign_id`, in declaration order, values unencoded.
pub fn query_pairs(inputs: &CampaignReportInputs) -> Vec<(&'static str, String)> {
    [
        (FIELDS, inputs.fields.as_deref()),
        (EXCLUDE_FIELDS, inputs.exclude_fields.as_deref()),
    ]
    .into_iter()
    .filter_map(|(name, items)| {
        let flat = flatten_list(items?);
        (!flat.is_empty()).then_some((name, flat))
    })
    .collect()
}

/// Encoded query string, or `None` when there is nothing to send.
pub fn query_string(inputs: &CampaignReportInputs) -> Option<String> {
    let pairs = query_pairs(inputs);
    if pairs.is_empty() {
        return None;
    }
    let encoded = pairs
        .iter()
        .map(|(name, value)| format!("{name}={}", encode_list(value)))
        .collect::<Vec<_>>()
        .join("&");
    Some(encoded)
}

// List separators stay literal.
fn encode_list(value: &str) -> String {
    value
        .split(',')
        .map(|item| urlencoding::encode(item).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}
