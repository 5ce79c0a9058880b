use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chimpreport_core::{ConfigError, JsonInputs};
use chimpreport_exec::credentials::{CredentialError, CredentialRef};
use chimpreport_exec::{
    CampaignReportOperation, HttpClient, HttpError, HttpRequestParts, HttpResponseParts,
    OperationError, StepEnvironment,
};
use secrecy::SecretString;
use serde_json::json;

struct MockHttpClient {
    requests: Arc<tokio::sync::Mutex<Vec<HttpRequestParts>>>,
    response: HttpResponseParts,
    fail_with: Option<HttpError>,
}

impl MockHttpClient {
    fn responding(status: u16, body: &str) -> Self {
        Self {
            requests: Arc::new(tokio::sync::Mutex::new(Vec::new())),
            response: HttpResponseParts {
                status,
                headers: BTreeMap::new(),
                body: body.as_bytes().to_vec(),
            },
            fail_with: None,
        }
    }

    fn failing(err: HttpError) -> Self {
        let mut client = Self::responding(200, "{}");
        client.fail_with = Some(err);
        client
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequestParts) -> Result<HttpResponseParts, HttpError> {
        self.requests.lock().await.push(req);
        if let Some(ref err) = self.fail_with {
            return Err(err.clone());
        }
        Ok(self.response.clone())
    }
}

struct MockEnvironment {
    server: Option<&'static str>,
    token: Option<&'static str>,
}

impl MockEnvironment {
    fn configured() -> Self {
        Self {
            server: Some("us6"),
            token: Some("tok-123"),
        }
    }
}

#[async_trait]
impl StepEnvironment for MockEnvironment {
    async fn credential(&self, provider: &str, key: &str) -> Result<SecretString, CredentialError> {
        let r = CredentialRef::new(provider, key);
        if provider != "mailchimp" || key != "access_token" {
            return Err(CredentialError::NotFound(r));
        }
        match self.token {
            Some(t) => Ok(SecretString::from(t.to_string())),
            None => Err(CredentialError::NotFound(r)),
        }
    }

    fn environment(&self, name: &str) -> Option<String> {
        match name {
            "mailchimp_server" => self.server.map(str::to_string),
            _ => None,
        }
    }
}

fn full_report_body() -> serde_json::Value {
    json!({
        "id": "42694e9e57",
        "web_id": 47,
        "type": "regular",
        "create_time": "2024-03-01T10:00:00+00:00",
        "archive_url": "http://eepurl.com/abc",
        "status": "sent",
        "emails_sent": 1204,
        "content_type": "template",
        "report_summary": {"opens": 500, "unique_opens": 420, "open_rate": 0.35},
        "recipients": {"list_id": "57afe96172"},
        "_links": [{"rel": "self", "href": "https://us6.api.mailchimp.com/3.0/campaigns/42694e9e57"}]
    })
}

#[tokio::test]
async fn missing_campaign_id_fails_validation_without_network() {
    let http = Arc::new(MockHttpClient::responding(200, "{}"));
    let requests = http.requests.clone();
    let op = CampaignReportOperation::new(http);

    let inputs = JsonInputs::new(json!({ "fields": ["id"] }));
    let err = op
        .run(&inputs, &MockEnvironment::configured())
        .await
        .unwrap_err();

    match err {
        OperationError::Validation(e) => assert!(e.has_violation_for("campaign_id")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(requests.lock().await.is_empty());
}

#[tokio::test]
async fn missing_server_setting_fails_config_without_network() {
    let http = Arc::new(MockHttpClient::responding(200, "{}"));
    let requests = http.requests.clone();
    let op = CampaignReportOperation::new(http);
    let env = MockEnvironment {
        server: None,
        token: Some("tok-123"),
    };

    let inputs = JsonInputs::new(json!({ "campaign_id": "c1" }));
    let err = op.run(&inputs, &env).await.unwrap_err();

    assert!(matches!(
        err,
        OperationError::Config(ConfigError::MissingSetting(ref name)) if name == "mailchimp_server"
    ));
    assert!(err.is_local());
    assert!(err.to_string().contains("mailchimp_server"));
    assert!(requests.lock().await.is_empty());
}

#[tokio::test]
async fn server_setting_is_checked_before_inputs() {
    let op = CampaignReportOperation::new(Arc::new(MockHttpClient::responding(200, "{}")));
    let env = MockEnvironment {
        server: None,
        token: None,
    };

    let err = op.run(&JsonInputs::default(), &env).await.unwrap_err();
    assert!(matches!(err, OperationError::Config(ConfigError::MissingSetting(_))));
}

#[tokio::test]
async fn missing_token_fails_config_without_network() {
    let http = Arc::new(MockHttpClient::responding(200, "{}"));
    let requests = http.requests.clone();
    let op = CampaignReportOperation::new(http);
    let env = MockEnvironment {
        server: Some("us6"),
        token: None,
    };

    let inputs = JsonInputs::new(json!({ "campaign_id": "c1" }));
    let err = op.run(&inputs, &env).await.unwrap_err();

    assert!(matches!(
        err,
        OperationError::Config(ConfigError::MissingCredential(ref r)) if r == "mailchimp://access_token"
    ));
    assert!(requests.lock().await.is_empty());
}

#[tokio::test]
async fn sends_one_authenticated_get_with_flattened_query() {
    let http = Arc::new(MockHttpClient::responding(200, &full_report_body().to_string()));
    let requests = http.requests.clone();
    let op = CampaignReportOperation::new(http);

    let inputs = JsonInputs::new(json!({
        "campaign_id": "42694e9e57",
        "fields": [" id ", "status"],
        "exclude_fields": ["_links"]
    }));
    op.run(&inputs, &MockEnvironment::configured()).await.unwrap();

    let reqs = requests.lock().await;
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].method, "GET");
    assert_eq!(
        reqs[0].url.as_str(),
        "https://us6.api.mailchimp.com/3.0/campaigns/42694e9e57?fields=id,status&exclude_fields=_links"
    );
    assert_eq!(reqs[0].headers["Authorization"], "Bearer tok-123");
    assert_eq!(reqs[0].headers["Accept"], "application/json");
}

#[tokio::test]
async fn no_optional_inputs_means_no_query_string() {
    let http = Arc::new(MockHttpClient::responding(200, "{}"));
    let requests = http.requests.clone();
    let op = CampaignReportOperation::new(http);

    let inputs = JsonInputs::new(json!({ "campaign_id": "c1" }));
    op.run(&inputs, &MockEnvironment::configured()).await.unwrap();

    let reqs = requests.lock().await;
    assert_eq!(reqs[0].url.query(), None);
    assert!(!reqs[0].url.as_str().contains('?'));
}

#[tokio::test]
async fn success_projects_exactly_the_declared_outputs() {
    let body = full_report_body();
    let op = CampaignReportOperation::new(Arc::new(MockHttpClient::responding(
        200,
        &body.to_string(),
    )));

    let inputs = JsonInputs::new(json!({ "campaign_id": "42694e9e57" }));
    let report = op
        .run(&inputs, &MockEnvironment::configured())
        .await
        .unwrap();

    assert_eq!(
        report.into_value(),
        json!({
            "id": body["id"],
            "type": body["type"],
            "create_time": body["create_time"],
            "archive_url": body["archive_url"],
            "status": body["status"],
            "emails_sent": body["emails_sent"],
            "report_summary": body["report_summary"],
            "_links": body["_links"],
        })
    );
}

#[tokio::test]
async fn not_found_fails_with_response_body_as_payload() {
    let body = json!({
        "type": "https://mailchimp.com/developer/marketing/docs/errors/",
        "title": "Resource Not Found",
        "status": 404,
        "detail": "The requested resource could not be found.",
        "instance": "995c5cb0-3280-4a6e-808b-3b096d0bb219"
    });
    let op = CampaignReportOperation::new(Arc::new(MockHttpClient::responding(
        404,
        &body.to_string(),
    )));

    let inputs = JsonInputs::new(json!({ "campaign_id": "nope" }));
    let err = op
        .run(&inputs, &MockEnvironment::configured())
        .await
        .unwrap_err();

    match &err {
        OperationError::Remote { status, .. } => assert_eq!(*status, 404),
        other => panic!("expected remote error, got {other:?}"),
    }
    assert_eq!(err.failure_payload(), body);
    assert!(!err.is_local());
}

#[tokio::test]
async fn non_200_success_codes_are_failures_too() {
    let op = CampaignReportOperation::new(Arc::new(MockHttpClient::responding(204, "")));

    let inputs = JsonInputs::new(json!({ "campaign_id": "c1" }));
    let err = op
        .run(&inputs, &MockEnvironment::configured())
        .await
        .unwrap_err();

    assert!(matches!(err, OperationError::Remote { status: 204, .. }));
    assert_eq!(err.failure_payload(), json!(""));
}

#[tokio::test]
async fn non_json_error_body_is_reported_as_text() {
    let op = CampaignReportOperation::new(Arc::new(MockHttpClient::responding(
        502,
        "<html>Bad Gateway</html>",
    )));

    let inputs = JsonInputs::new(json!({ "campaign_id": "c1" }));
    let err = op
        .run(&inputs, &MockEnvironment::configured())
        .await
        .unwrap_err();

    assert_eq!(err.failure_payload(), json!("<html>Bad Gateway</html>"));
}

#[tokio::test]
async fn transport_error_is_surfaced() {
    let op = CampaignReportOperation::new(Arc::new(MockHttpClient::failing(
        HttpError::Network("connection refused".to_string()),
    )));

    let inputs = JsonInputs::new(json!({ "campaign_id": "c1" }));
    let err = op
        .run(&inputs, &MockEnvironment::configured())
        .await
        .unwrap_err();

    assert!(matches!(err, OperationError::Transport(HttpError::Network(_))));
    assert_eq!(
        err.failure_payload(),
        json!({"type": "network", "message": "connect/dns/tls error: connection refused"})
    );
}

#[tokio::test]
async fn prepare_builds_url_without_credentials() {
    let op = CampaignReportOperation::new(Arc::new(MockHttpClient::responding(200, "{}")))
        .with_api_host("gateway.example.com");
    let env = MockEnvironment {
        server: Some("us19"),
        token: None,
    };

    let inputs = JsonInputs::new(json!({ "campaign_id": "c1", "fields": "emails_sent" }));
    let prepared = op.prepare(&inputs, &env).unwrap();

    assert_eq!(
        prepared.url.as_str(),
        "https://us19.gateway.example.com/3.0/campaigns/c1?fields=emails_sent"
    );
    assert_eq!(prepared.endpoint.subdomain(), "us19");
    assert_eq!(prepared.inputs.fields, Some(vec!["emails_sent".to_string()]));
}

#[tokio::test]
async fn dot_segment_campaign_id_is_never_sent() {
    let http = Arc::new(MockHttpClient::responding(200, "{}"));
    let requests = http.requests.clone();
    let op = CampaignReportOperation::new(http);

    let inputs = JsonInputs::new(json!({ "campaign_id": ".." }));
    let err = op
        .run(&inputs, &MockEnvironment::configured())
        .await
        .unwrap_err();

    match err {
        OperationError::Validation(e) => assert!(e.has_violation_for("campaign_id")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(requests.lock().await.is_empty());
}

#[tokio::test]
async fn api_host_with_userinfo_is_a_config_error() {
    let http = Arc::new(MockHttpClient::responding(200, "{}"));
    let requests = http.requests.clone();
    let op = CampaignReportOperation::new(http).with_api_host("evil.example@x");

    let inputs = JsonInputs::new(json!({ "campaign_id": "c1" }));
    let err = op
        .run(&inputs, &MockEnvironment::configured())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OperationError::Config(ConfigError::InvalidSetting { ref name, .. }) if name == "api_host"
    ));
    assert!(requests.lock().await.is_empty());
}

#[tokio::test]
async fn request_debug_output_hides_the_token() {
    let op = CampaignReportOperation::new(Arc::new(MockHttpClient::responding(200, "{}")));
    let inputs = JsonInputs::new(json!({ "campaign_id": "c1" }));
    let prepared = op.prepare(&inputs, &MockEnvironment::configured()).unwrap();

    let req = prepared.into_http_request(&SecretString::from("tok-123".to_string()));
    let debug = format!("{req:?}");
    assert!(!debug.contains("tok-123"));
    assert!(debug.contains("<redacted>"));
}
