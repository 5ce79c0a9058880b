use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::credentials::{CredentialError, CredentialProvider, CredentialRef};

/// Credentials and environment settings for the running step.
#[async_trait]
pub trait StepEnvironment: Send + Sync {
    async fn credential(&self, provider: &str, key: &str) -> Result<SecretString, CredentialError>;

    fn environment(&self, name: &str) -> Option<String>;
}

/// Where named environment settings come from.
pub trait EnvironmentSource: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}

/// Process environment. `mailchimp_server` is looked up as-is, then as `MAILCHIMP_SERVER`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name)
            .ok()
            .or_else(|| std::env::var(name.to_ascii_uppercase()).ok())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment(BTreeMap<String, String>);

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }
}

impl EnvironmentSource for StaticEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// The standard [`StepEnvironment`]: a credential provider plus a settings source.
#[derive(Clone)]
pub struct HostEnvironment {
    credentials: Arc<dyn CredentialProvider>,
    settings: Arc<dyn EnvironmentSource>,
}

impl HostEnvironment {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        settings: Arc<dyn EnvironmentSource>,
    ) -> Self {
        Self {
            credentials,
            settings,
        }
    }
}

#[async_trait]
impl StepEnvironment for HostEnvironment {
    async fn credential(&self, provider: &str, key: &str) -> Result<SecretString, CredentialError> {
        self.credentials.get(&CredentialRef::new(provider, key)).await
    }

    fn environment(&self, name: &str) -> Option<String> {
        self.settings.get(name)
    }
}
