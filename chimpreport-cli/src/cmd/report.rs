use std::sync::Arc;

use chimpreport_exec::{CampaignReportOperation, ReqwestHttpClient};

use crate::exit_codes;
use crate::output::{print_error, print_failure, print_result};
use crate::utils::{build_environment, build_inputs};
use crate::{EnvArgs, HttpArgs, InputArgs, OutputArgs, SecretsArgs};

pub async fn report_cmd(
    input: InputArgs,
    env: EnvArgs,
    secrets: SecretsArgs,
    http: HttpArgs,
    output: OutputArgs,
) -> i32 {
    let inputs = match build_inputs(&input) {
        Ok(i) => i,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };
    let environment = match build_environment(&env, &secrets) {
        Ok(e) => e,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };
    let client = match ReqwestHttpClient::new(http.max_response_bytes) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let op = CampaignReportOperation::new(Arc::new(client)).with_api_host(env.api_host.clone());
    match op.run(&inputs, &environment).await {
        Ok(report) => {
            tracing::debug!(outputs = report.len(), "campaign report fetched");
            print_result(output.format, output.quiet, &report);
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_failure(output.format, output.quiet, &e);
            if e.is_local() {
                exit_codes::VALIDATION_FAILED
            } else {
                exit_codes::RUN_FAILED
            }
        }
    }
}
