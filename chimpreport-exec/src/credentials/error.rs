use chimpreport_core::ConfigError;

use crate::credentials::CredentialRef;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential not found: {0}")]
    NotFound(CredentialRef),
    #[error("credential provider error for {credential}: {message}")]
    Provider {
        credential: CredentialRef,
        message: String,
    },
}

impl CredentialError {
    pub fn provider(credential: CredentialRef, message: impl Into<String>) -> Self {
        Self::Provider {
            credential,
            message: message.into(),
        }
    }
}

impl From<CredentialError> for ConfigError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::NotFound(r) => ConfigError::MissingCredential(r.to_string()),
            CredentialError::Provider {
                credential,
                message,
            } => ConfigError::CredentialProvider {
                reference: credential.to_string(),
                message,
            },
        }
    }
}
