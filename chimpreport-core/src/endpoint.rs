use std::sync::LazyLock;

use regex::Regex;
use url::{Host, Url};

use crate::error::{ConfigError, EndpointError, ValidationError};
use crate::inputs::{campaign_id_violation, CampaignReportInputs};
use crate::query::query_string;

pub const DEFAULT_API_HOST: &str = "api.mailchimp.com";
pub const API_VERSION: &str = "3.0";

/// Environment setting holding the account's data-center subdomain (e.g. `us6`).
pub const SERVER_SETTING: &str = "mailchimp_server";

static DNS_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9\-]{0,61}[A-Za-z0-9])?$").expect("valid")
});

/// Per-account API endpoint: `https://{subdomain}.{host}/3.0/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    subdomain: String,
    host: String,
}

impl ApiEndpoint {
    pub fn new(subdomain: impl Into<String>) -> Result<Self, ConfigError> {
        let subdomain = subdomain.into().trim().to_string();
        if subdomain.is_empty() {
            return Err(ConfigError::MissingSetting(SERVER_SETTING.to_string()));
        }
        if !DNS_LABEL_RE.is_match(&subdomain) {
            return Err(ConfigError::invalid_setting(
                SERVER_SETTING,
                format!("{subdomain:?} is not a valid DNS label"),
            ));
        }
        Ok(Self {
            subdomain,
            host: DEFAULT_API_HOST.to_string(),
        })
    }

    /// Build from the raw host setting; absent and blank are both "missing".
    pub fn from_setting(value: Option<&str>) -> Result<Self, ConfigError> {
        match value {
            Some(v) => Self::new(v),
            None => Err(ConfigError::MissingSetting(SERVER_SETTING.to_string())),
        }
    }

    /// Point at a different API host. Must be a bare domain or IP: no port, userinfo or path.
    pub fn with_host(mut self, host: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = host.into();
        let parsed = Host::parse(raw.trim())
            .map_err(|e| ConfigError::invalid_setting("api_host", format!("{raw:?}: {e}")))?;
        self.host = parsed.to_string();
        Ok(self)
    }

    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        self.parse(&format!(
            "https://{}.{}/{API_VERSION}/",
            self.subdomain, self.host
        ))
    }

    /// `campaigns/{campaign_id}` under the base URL, plus the flattened query if any.
    pub fn campaign_url(&self, inputs: &CampaignReportInputs) -> Result<Url, EndpointError> {
        if let Some(v) = campaign_id_violation(&inputs.campaign_id) {
            return Err(ValidationError::new(vec![v]).into());
        }
        let mut url = self.parse(&format!(
            "https://{}.{}/{API_VERSION}/campaigns/{}",
            self.subdomain,
            self.host,
            urlencoding::encode(&inputs.campaign_id)
        ))?;
        url.set_query(query_string(inputs).as_deref());
        Ok(url)
    }

    fn parse(&self, raw: &str) -> Result<Url, ConfigError> {
        Url::parse(raw)
            .map_err(|e| ConfigError::invalid_setting("api_host", format!("{}: {e}", self.host)))
    }
}
