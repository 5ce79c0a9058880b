#![forbid(unsafe_code)]

//! Pure request-building logic for the Mailchimp campaign report step.
//!
//! Nothing in this crate performs I/O: it declares the step's inputs and outputs, validates what
//! the host handed over, builds the per-account request URL and projects the response body.
//! The runtime side (credentials, HTTP) lives in `chimpreport-exec`.

pub mod endpoint;
pub mod error;
pub mod inputs;
pub mod outputs;
pub mod query;

pub use crate::endpoint::{ApiEndpoint, API_VERSION, DEFAULT_API_HOST, SERVER_SETTING};
pub use crate::error::{ConfigError, EndpointError, ValidationError, Violation};
pub use crate::inputs::{
    pick_inputs, CampaignReportInputs, InputKind, InputSpec, InputValue, JsonInputs, StepInputs,
    INPUTS,
};
pub use crate::outputs::{project, CampaignReport, OUTPUTS};
pub use crate::query::{flatten_list, query_pairs, query_string, trim_list};
