use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the campaign report and print the projected record.
    Report {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        env: EnvArgs,
        #[command(flatten)]
        secrets: SecretsArgs,
        #[command(flatten)]
        http: HttpArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the request URL without sending anything.
    Url {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        env: EnvArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check the server setting and access token.
    Doctor {
        #[command(flatten)]
        env: EnvArgs,
        #[command(flatten)]
        secrets: SecretsArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
