use chimpreport_core::{ApiEndpoint, SERVER_SETTING};
use chimpreport_exec::{StepEnvironment, CREDENTIAL_KEY, CREDENTIAL_PROVIDER};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::build_environment;
use crate::{EnvArgs, OutputArgs, SecretsArgs};

#[derive(Serialize)]
struct Check {
    name: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Check {
    fn ok(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            status: "ok".to_string(),
            message: Some(message),
        }
    }

    fn error(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            status: "error".to_string(),
            message: Some(message),
        }
    }
}

#[derive(Serialize)]
struct DoctorResult {
    checks: Vec<Check>,
    all_passed: bool,
}

pub async fn doctor_cmd(env: EnvArgs, secrets: SecretsArgs, output: OutputArgs) -> i32 {
    let environment = match build_environment(&env, &secrets) {
        Ok(e) => e,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let checks = vec![
        check_server(&environment, &env.api_host),
        check_token(&environment).await,
    ];

    let all_passed = checks.iter().all(|c| c.status == "ok");
    let result = DoctorResult { checks, all_passed };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Environment checks:");
        for c in &result.checks {
            let icon = if c.status == "ok" { "✓" } else { "✗" };
            print!("  {} {}: {}", icon, c.name, c.status);
            if let Some(msg) = &c.message {
                print!(" - {msg}");
            }
            println!();
        }
        if result.all_passed {
            println!("\nAll checks passed.");
        } else {
            println!("\nSome checks failed.");
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if all_passed {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUNTIME_ERROR
    }
}

fn check_server(environment: &dyn StepEnvironment, api_host: &str) -> Check {
    let endpoint = ApiEndpoint::from_setting(environment.environment(SERVER_SETTING).as_deref())
        .and_then(|e| e.with_host(api_host))
        .and_then(|e| e.base_url());
    match endpoint {
        Ok(url) => Check::ok(SERVER_SETTING, format!("endpoint {url}")),
        Err(e) => Check::error(SERVER_SETTING, e.to_string()),
    }
}

// Presence only; the token is never printed or sent.
async fn check_token(environment: &dyn StepEnvironment) -> Check {
    let name = format!("{CREDENTIAL_PROVIDER}://{CREDENTIAL_KEY}");
    match environment
        .credential(CREDENTIAL_PROVIDER, CREDENTIAL_KEY)
        .await
    {
        Ok(_) => Check::ok(&name, "present".to_string()),
        Err(e) => Check::error(&name, e.to_string()),
    }
}
