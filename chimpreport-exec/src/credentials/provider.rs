use std::path::PathBuf;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::credentials::{CredentialError, CredentialRef};

/// Source of per-integration secrets, e.g. the bearer token for `mailchimp://access_token`.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn get(&self, credential: &CredentialRef) -> Result<SecretString, CredentialError>;
}

/// Tries each provider in order; the first answer other than "not found" wins.
#[derive(Default)]
pub struct CompositeProvider {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CompositeProvider {
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl CredentialProvider for CompositeProvider {
    async fn get(&self, credential: &CredentialRef) -> Result<SecretString, CredentialError> {
        for p in &self.providers {
            match p.get(credential).await {
                Ok(v) => return Ok(v),
                Err(CredentialError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(CredentialError::NotFound(credential.clone()))
    }
}

/// Reads `{env_prefix}{PROVIDER}_{KEY}` from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialProvider {
    pub env_prefix: Option<String>,
}

impl EnvCredentialProvider {
    pub fn var_name(&self, credential: &CredentialRef) -> String {
        match &self.env_prefix {
            None => credential.env_var_name(),
            Some(p) => format!("{p}{}", credential.env_var_name()),
        }
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn get(&self, credential: &CredentialRef) -> Result<SecretString, CredentialError> {
        match std::env::var(self.var_name(credential)) {
            Ok(v) if v.trim().is_empty() => Err(CredentialError::NotFound(credential.clone())),
            Ok(v) => Ok(SecretString::from(v)),
            Err(std::env::VarError::NotPresent) => {
                Err(CredentialError::NotFound(credential.clone()))
            }
            Err(e) => Err(CredentialError::provider(credential.clone(), e.to_string())),
        }
    }
}

/// Reads `{base_dir}/{provider}/{key}`; one trailing newline is stripped.
#[derive(Debug, Clone)]
pub struct FileCredentialProvider {
    pub base_dir: PathBuf,
}

impl FileCredentialProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn path_for(&self, credential: &CredentialRef) -> PathBuf {
        self.base_dir.join(&credential.provider).join(&credential.key)
    }
}

#[async_trait]
impl CredentialProvider for FileCredentialProvider {
    async fn get(&self, credential: &CredentialRef) -> Result<SecretString, CredentialError> {
        let path = self.path_for(credential);
        let mut content = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CredentialError::NotFound(credential.clone()));
            }
            Err(e) => {
                return Err(CredentialError::provider(
                    credential.clone(),
                    format!("{}: {e}", path.display()),
                ));
            }
        };
        if content.ends_with('\n') {
            content.pop();
            if content.ends_with('\r') {
                content.pop();
            }
        }
        Ok(SecretString::from(content))
    }
}
