use std::collections::BTreeMap;
use std::sync::Arc;

use chimpreport_core::{
    pick_inputs, project, ApiEndpoint, CampaignReport, CampaignReportInputs, ConfigError,
    StepInputs, DEFAULT_API_HOST, SERVER_SETTING,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value as JsonValue;
use url::Url;

use crate::context::StepEnvironment;
use crate::credentials::redact_headers;
use crate::error::OperationError;
use crate::http::{HttpClient, HttpRequestParts, HttpResponseParts};

pub const CREDENTIAL_PROVIDER: &str = "mailchimp";
pub const CREDENTIAL_KEY: &str = "access_token";

/// A validated request that has not been sent yet.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub endpoint: ApiEndpoint,
    pub inputs: CampaignReportInputs,
    pub url: Url,
}

impl PreparedRequest {
    pub fn into_http_request(self, token: &SecretString) -> HttpRequestParts {
        let mut headers = BTreeMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", token.expose_secret()),
        );
        headers.insert("Accept".to_string(), "application/json".to_string());
        HttpRequestParts {
            method: "GET".to_string(),
            url: self.url,
            headers,
        }
    }
}

/// Fetches one campaign report summary and projects it to the declared outputs.
pub struct CampaignReportOperation {
    http: Arc<dyn HttpClient>,
    api_host: String,
}

impl CampaignReportOperation {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            api_host: DEFAULT_API_HOST.to_string(),
        }
    }

    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Check configuration and inputs and build the URL. Sends nothing.
    pub fn prepare(
        &self,
        inputs: &dyn StepInputs,
        env: &dyn StepEnvironment,
    ) -> Result<PreparedRequest, OperationError> {
        prepare_request(inputs, env, &self.api_host)
    }

    pub async fn run(
        &self,
        inputs: &dyn StepInputs,
        env: &dyn StepEnvironment,
    ) -> Result<CampaignReport, OperationError> {
        let prepared = self.prepare(inputs, env)?;
        let token = env
            .credential(CREDENTIAL_PROVIDER, CREDENTIAL_KEY)
            .await
            .map_err(ConfigError::from)?;
        let req = prepared.into_http_request(&token);

        tracing::debug!(
            method = %req.method,
            url = %req.url,
            headers = ?redact_headers(&req.headers, &[]).headers,
            "requesting campaign report"
        );

        let resp = match self.http.send(req).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "campaign report request failed");
                return Err(e.into());
            }
        };
        tracing::debug!(status = resp.status, bytes = resp.body.len(), "campaign report response");

        let body = parse_body(&resp);
        if resp.status != 200 {
            tracing::warn!(status = resp.status, "campaign report request rejected");
            return Err(OperationError::Remote {
                status: resp.status,
                body,
            });
        }
        Ok(project(&body))
    }
}

/// The server setting is checked before the inputs, and neither touches the credential provider.
pub fn prepare_request(
    inputs: &dyn StepInputs,
    env: &dyn StepEnvironment,
    api_host: &str,
) -> Result<PreparedRequest, OperationError> {
    let endpoint = ApiEndpoint::from_setting(env.environment(SERVER_SETTING).as_deref())?
        .with_host(api_host)?;
    let inputs = pick_inputs(inputs)?;
    let url = endpoint.campaign_url(&inputs)?;
    Ok(PreparedRequest {
        endpoint,
        inputs,
        url,
    })
}

// JSON when it parses, otherwise the raw text.
fn parse_body(resp: &HttpResponseParts) -> JsonValue {
    serde_json::from_slice(&resp.body)
        .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(&resp.body).into_owned()))
}
