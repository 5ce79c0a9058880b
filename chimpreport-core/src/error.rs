use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid step inputs: {summary}")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
    summary: String,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let summary = violations
            .iter()
            .map(|v| format!("{}: {}", v.path, v.message))
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            violations,
            summary,
        }
    }

    pub fn has_violation_for(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Host configuration problems. These are detected before any request is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment setting [{0}]")]
    MissingSetting(String),
    #[error("invalid environment setting [{name}]: {reason}")]
    InvalidSetting { name: String, reason: String },
    #[error("missing credential [{0}]")]
    MissingCredential(String),
    #[error("credential provider error for [{reference}]: {message}")]
    CredentialProvider { reference: String, message: String },
}

impl ConfigError {
    pub fn invalid_setting(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Failure to build a request URL: either bad host configuration or an input that cannot
/// address a single campaign.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
