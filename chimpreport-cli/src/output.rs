use chimpreport_exec::OperationError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    let rendered = match format {
        OutputFormat::Text => serde_json::to_string_pretty(result),
        OutputFormat::Json => serde_json::to_string(result),
    };
    if let Ok(s) = rendered {
        println!("{s}");
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}

/// Like [`print_error`], but also shows what the host would receive as the failure value.
pub fn print_failure(format: OutputFormat, quiet: bool, err: &OperationError) {
    if quiet {
        return;
    }
    let payload = err.failure_payload();
    match format {
        OutputFormat::Text => {
            eprintln!("error: {err}");
            if let OperationError::Remote { .. } = err {
                if let Ok(s) = serde_json::to_string_pretty(&payload) {
                    eprintln!("{s}");
                }
            }
        }
        OutputFormat::Json => {
            let out = serde_json::json!({"error": err.to_string(), "payload": payload});
            eprintln!("{}", serde_json::to_string(&out).unwrap_or_default());
        }
    }
}
