use std::collections::BTreeMap;

pub const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone)]
pub struct RedactedHeaders {
    pub headers: BTreeMap<String, String>,
}

/// Copy of `headers` safe to log: `Authorization`, `Cookie` and any `extra` names are masked.
pub fn redact_headers(headers: &BTreeMap<String, String>, extra: &[&str]) -> RedactedHeaders {
    let mut out = headers.clone();
    for name in ["authorization", "cookie"].iter().chain(extra) {
        mask_case_insensitive(&mut out, name);
    }
    RedactedHeaders { headers: out }
}

fn mask_case_insensitive(map: &mut BTreeMap<String, String>, header: &str) {
    let keys = map
        .keys()
        .filter(|k| k.eq_ignore_ascii_case(header))
        .cloned()
        .collect::<Vec<_>>();
    for k in keys {
        map.insert(k, REDACTED.to_string());
    }
}
