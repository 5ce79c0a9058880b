use std::path::PathBuf;

use chimpreport_core::DEFAULT_API_HOST;
use chimpreport_exec::DEFAULT_MAX_RESPONSE_BYTES;
use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    #[arg(long)]
    pub campaign_id: Option<String>,
    /// Response field to include; repeatable.
    #[arg(long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,
    /// Response field to exclude; repeatable.
    #[arg(long = "exclude-field", value_name = "FIELD")]
    pub exclude_fields: Vec<String>,
    /// JSON or YAML file with step inputs. Flags take precedence.
    #[arg(long)]
    pub inputs: Option<PathBuf>,
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set_inputs: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct EnvArgs {
    /// Account data-center subdomain, e.g. us6. Defaults to the mailchimp_server environment setting.
    #[arg(long)]
    pub server: Option<String>,
    #[arg(long, default_value = DEFAULT_API_HOST)]
    pub api_host: String,
}

#[derive(Debug, Args, Clone)]
pub struct SecretsArgs {
    /// Credential sources, comma separated: `env` and/or `file:<DIR>`.
    #[arg(long, default_value = "env")]
    pub secrets: String,
    #[arg(long)]
    pub secrets_env_prefix: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct HttpArgs {
    #[arg(long, default_value_t = DEFAULT_MAX_RESPONSE_BYTES)]
    pub max_response_bytes: usize,
}
