use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::{ValidationError, Violation};

pub const CAMPAIGN_ID: &str = "campaign_id";
pub const FIELDS: &str = "fields";
pub const EXCLUDE_FIELDS: &str = "exclude_fields";

/// Read access to the inputs a host declared for the running step.
pub trait StepInputs: Send + Sync {
    fn input(&self, key: &str) -> Option<JsonValue>;
}

impl StepInputs for Map<String, JsonValue> {
    fn input(&self, key: &str) -> Option<JsonValue> {
        self.get(key).cloned()
    }
}

impl StepInputs for BTreeMap<String, JsonValue> {
    fn input(&self, key: &str) -> Option<JsonValue> {
        self.get(key).cloned()
    }
}

/// Step inputs backed by a JSON document. Anything other than an object has no inputs.
#[derive(Debug, Clone, Default)]
pub struct JsonInputs(Map<String, JsonValue>);

impl JsonInputs {
    pub fn new(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Set a single input, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: JsonValue) {
        self.0.insert(key.into(), value);
    }

    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.0)
    }
}

impl StepInputs for JsonInputs {
    fn input(&self, key: &str) -> Option<JsonValue> {
        self.0.input(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    String,
    /// A list of strings. A lone string is accepted as a one-element list.
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSpec {
    pub key: &'static str,
    pub kind: InputKind,
    pub required: bool,
}

/// Declared inputs of the campaign report step, in query-parameter order.
pub const INPUTS: &[InputSpec] = &[
    InputSpec {
        key: CAMPAIGN_ID,
        kind: InputKind::String,
        required: true,
    },
    InputSpec {
        key: FIELDS,
        kind: InputKind::Array,
        required: false,
    },
    InputSpec {
        key: EXCLUDE_FIELDS,
        kind: InputKind::Array,
        required: false,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    String(String),
    Array(Vec<String>),
}

impl InputValue {
    pub fn into_string(self) -> Option<String> {
        match self {
            Self::String(s) => Some(s),
            Self::Array(_) => None,
        }
    }

    pub fn into_array(self) -> Option<Vec<String>> {
        match self {
            Self::Array(items) => Some(items),
            Self::String(_) => None,
        }
    }
}

impl InputSpec {
    /// Coerce a raw host value to this input's kind. `Ok(None)` means the input is absent.
    pub fn pick(&self, raw: Option<JsonValue>) -> Result<Option<InputValue>, String> {
        let raw = match raw {
            None | Some(JsonValue::Null) => return Ok(None),
            Some(v) => v,
        };
        match self.kind {
            InputKind::String => match raw {
                JsonValue::String(s) => {
                    let s = s.trim();
                    if s.is_empty() {
                        Ok(None)
                    } else {
                        Ok(Some(InputValue::String(s.to_string())))
                    }
                }
                JsonValue::Number(n) => Ok(Some(InputValue::String(n.to_string()))),
                other => Err(format!("expected a string, got {}", json_type(&other))),
            },
            InputKind::Array => match raw {
                JsonValue::String(s) => Ok(Some(InputValue::Array(vec![s]))),
                JsonValue::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        JsonValue::String(s) => Ok(s),
                        other => Err(format!(
                            "expected a list of strings, found {}",
                            json_type(&other)
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(|items| Some(InputValue::Array(items))),
                other => Err(format!("expected a list of strings, got {}", json_type(&other))),
            },
        }
    }
}

/// Validated inputs of one campaign report invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CampaignReportInputs {
    pub campaign_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_fields: Option<Vec<String>>,
}

impl CampaignReportInputs {
    pub fn new(campaign_id: impl Into<String>) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            ..Default::default()
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_exclude_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

/// Read every declared input and collect all violations before failing.
pub fn pick_inputs(inputs: &dyn StepInputs) -> Result<CampaignReportInputs, ValidationError> {
    let mut violations = Vec::new();
    let mut values = BTreeMap::new();

    for spec in INPUTS {
        match spec.pick(inputs.input(spec.key)) {
            Ok(Some(value)) => {
                values.insert(spec.key, value);
            }
            Ok(None) if spec.required => {
                violations.push(Violation::new(spec.key, "is required"));
            }
            Ok(None) => {}
            Err(message) => violations.push(Violation::new(spec.key, message)),
        }
    }

    if let Some(InputValue::String(id)) = values.get(CAMPAIGN_ID) {
        violations.extend(campaign_id_violation(id));
    }

    if !violations.is_empty() {
        return Err(ValidationError::new(violations));
    }

    Ok(CampaignReportInputs {
        campaign_id: values
            .remove(CAMPAIGN_ID)
            .and_then(InputValue::into_string)
            .unwrap_or_default(),
        fields: values.remove(FIELDS).and_then(InputValue::into_array),
        exclude_fields: values.remove(EXCLUDE_FIELDS).and_then(InputValue::into_array),
    })
}

/// `.` and `..` would be resolved away as path steps, addressing a different resource.
/// Percent-encoded forms do not help: URL parsers treat `%2E%2E` as `..` too.
pub fn campaign_id_violation(id: &str) -> Option<Violation> {
    matches!(id, "." | "..")
        .then(|| Violation::new(CAMPAIGN_ID, format!("{id:?} is not a campaign id")))
}

fn json_type(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
