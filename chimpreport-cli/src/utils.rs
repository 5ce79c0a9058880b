use std::path::Path;
use std::sync::Arc;

use chimpreport_core::{JsonInputs, SERVER_SETTING};
use chimpreport_exec::credentials::{
    CompositeProvider, CredentialProvider, EnvCredentialProvider, FileCredentialProvider,
};
use chimpreport_exec::{EnvironmentSource, HostEnvironment, ProcessEnvironment, StaticEnvironment};
use serde_json::Value as JsonValue;

use crate::{EnvArgs, InputArgs, SecretsArgs};

pub fn load_inputs(path: &Path) -> Result<JsonValue, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read inputs {}: {e}", path.display()))?;
    if let Ok(v) = serde_json::from_str(&content) {
        return Ok(v);
    }
    if let Ok(v) = serde_yaml::from_str(&content) {
        return Ok(v);
    }
    Err("inputs file is neither valid JSON nor YAML".to_string())
}

/// Inputs file first, then `--set`, then the dedicated flags.
pub fn build_inputs(args: &InputArgs) -> Result<JsonInputs, String> {
    let mut inputs = match &args.inputs {
        Some(path) => JsonInputs::new(load_inputs(path)?),
        None => JsonInputs::default(),
    };
    for s in &args.set_inputs {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| format!("--set expects KEY=VALUE, got {s:?}"))?;
        inputs.set(k, JsonValue::String(v.to_string()));
    }
    if let Some(id) = &args.campaign_id {
        inputs.set("campaign_id", JsonValue::String(id.clone()));
    }
    if !args.fields.is_empty() {
        inputs.set("fields", string_list(&args.fields));
    }
    if !args.exclude_fields.is_empty() {
        inputs.set("exclude_fields", string_list(&args.exclude_fields));
    }
    Ok(inputs)
}

fn string_list(items: &[String]) -> JsonValue {
    JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
}

pub fn build_settings(env: &EnvArgs) -> Arc<dyn EnvironmentSource> {
    match &env.server {
        Some(server) => Arc::new(StaticEnvironment::new().with(SERVER_SETTING, server.clone())),
        None => Arc::new(ProcessEnvironment),
    }
}

pub fn build_credentials(secrets: &SecretsArgs) -> Result<Arc<dyn CredentialProvider>, String> {
    let mut providers: Vec<Box<dyn CredentialProvider>> = Vec::new();
    for source in secrets.secrets.split(',').map(str::trim) {
        if source == "env" {
            providers.push(Box::new(EnvCredentialProvider {
                env_prefix: secrets.secrets_env_prefix.clone(),
            }));
        } else if let Some(dir) = source.strip_prefix("file:") {
            providers.push(Box::new(FileCredentialProvider::new(dir)));
        } else {
            return Err(format!("unknown credential source: {source:?}"));
        }
    }
    Ok(Arc::new(CompositeProvider::new(providers)))
}

pub fn build_environment(env: &EnvArgs, secrets: &SecretsArgs) -> Result<HostEnvironment, String> {
    Ok(HostEnvironment::new(build_credentials(secrets)?, build_settings(env)))
}
