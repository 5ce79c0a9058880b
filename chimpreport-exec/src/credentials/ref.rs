use std::fmt;

/// Names one credential: `{provider}://{key}`, e.g. `mailchimp://access_token`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CredentialRef {
    pub provider: String,
    pub key: String,
}

impl CredentialRef {
    pub fn new(provider: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            key: key.into(),
        }
    }

    /// Environment-variable form: `MAILCHIMP_ACCESS_TOKEN`.
    pub fn env_var_name(&self) -> String {
        format!("{}_{}", self.provider, self.key)
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl fmt::Display for CredentialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // an identifier, never the value
        write!(f, "{}://{}", self.provider, self.key)
    }
}
