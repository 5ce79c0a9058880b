mod error;
mod provider;
mod redact;
mod r#ref;

pub use error::CredentialError;
pub use provider::{
    CompositeProvider, CredentialProvider, EnvCredentialProvider, FileCredentialProvider,
};
pub use redact::{redact_headers, RedactedHeaders, REDACTED};
pub use r#ref::CredentialRef;
