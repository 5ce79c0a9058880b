use std::sync::Arc;

use chimpreport_core::CampaignReportInputs;
use chimpreport_exec::credentials::CompositeProvider;
use chimpreport_exec::{prepare_request, HostEnvironment};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_failure, print_result, OutputFormat};
use crate::utils::{build_inputs, build_settings};
use crate::{EnvArgs, InputArgs, OutputArgs};

#[derive(Serialize)]
struct UrlResult {
    method: &'static str,
    url: String,
    inputs: CampaignReportInputs,
}

pub async fn url_cmd(input: InputArgs, env: EnvArgs, output: OutputArgs) -> i32 {
    let inputs = match build_inputs(&input) {
        Ok(i) => i,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };
    // No credential is read for a dry run.
    let environment =
        HostEnvironment::new(Arc::new(CompositeProvider::default()), build_settings(&env));

    match prepare_request(&inputs, &environment, &env.api_host) {
        Ok(prepared) => {
            if output.format == OutputFormat::Text && !output.quiet {
                println!("{}", prepared.url);
            } else {
                let result = UrlResult {
                    method: "GET",
                    url: prepared.url.to_string(),
                    inputs: prepared.inputs,
                };
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_failure(output.format, output.quiet, &e);
            exit_codes::VALIDATION_FAILED
        }
    }
}
