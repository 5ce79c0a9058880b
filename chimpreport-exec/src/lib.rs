#![forbid(unsafe_code)]

//! Runtime side of the campaign report step.
//!
//! Request building and validation live in `chimpreport-core`; this crate supplies the host
//! seams (step environment, credentials), the HTTP client and the operation that drives one call.

pub mod context;
pub mod credentials;
pub mod error;
pub mod http;
pub mod operation;

pub use crate::context::{
    EnvironmentSource, HostEnvironment, ProcessEnvironment, StaticEnvironment, StepEnvironment,
};
pub use crate::error::OperationError;
pub use crate::http::{
    HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient,
    DEFAULT_MAX_RESPONSE_BYTES,
};
pub use crate::operation::{
    prepare_request, CampaignReportOperation, PreparedRequest, CREDENTIAL_KEY,
    CREDENTIAL_PROVIDER,
};
