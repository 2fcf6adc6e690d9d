// # gcp-ddns - single-instance DDNS updater
//
// The binary is a thin integration layer:
// 1. Parse command-line arguments
// 2. Read credentials from the environment
// 3. Build the Compute Engine and Cloud DNS providers
// 4. Locate the instance's public address
// 5. Upsert the address record
// 6. Print SUCCESS or FAILURE
//
// All DDNS logic lives in gcp-ddns-core.
//
// ## Configuration
//
// ### Credentials
// - `GCP_DDNS_CREDENTIALS_FILE`: JSON file with `user_id` and `key`
// - `GCP_DDNS_USER_ID` / `GCP_DDNS_KEY`: used when no file is given
//
// ### Endpoints (optional)
// - `GCP_DDNS_COMPUTE_ENDPOINT`, `GCP_DDNS_DNS_ENDPOINT`
//
// ### Logging
// - `GCP_DDNS_LOG_LEVEL`: trace, debug, info (default), warn, error
//
// ## Example
//
// ```bash
// export GCP_DDNS_USER_ID=ddns@my-project.iam.gserviceaccount.com
// export GCP_DDNS_KEY="$(gcloud auth print-access-token)"
//
// gcp-ddns -p my-project -t 300 -r host -z example.com -i web-1 -d us-central1-a
// ```

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use gcp_ddns_core::{Config, InstanceLocator, Invocation, RecordUpdater, UpsertOutcome};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;

/// Environment variable selecting the log level
const ENV_LOG_LEVEL: &str = "GCP_DDNS_LOG_LEVEL";

/// Exit codes for different termination scenarios
///
/// - 0: Record points at the instance
/// - 1: Configuration or usage error (nothing was attempted)
/// - 2: Runtime error (authentication, transport, instance lookup)
/// - 3: The upsert itself failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Update succeeded
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
    /// Updater reported a failed outcome
    UpdateFailed = 3,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Parse a log level name
fn parse_log_level(value: &str) -> Result<Level> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "{} '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            ENV_LOG_LEVEL,
            value
        ),
    }
}

/// Map the run result to the printed verdict and exit code
fn verdict(result: &Result<UpsertOutcome>) -> (&'static str, DdnsExitCode) {
    match result {
        Ok(outcome) if outcome.is_success() => ("SUCCESS", DdnsExitCode::Success),
        Ok(_) => ("FAILURE", DdnsExitCode::UpdateFailed),
        Err(_) => ("FAILURE", DdnsExitCode::RuntimeError),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too
            let _ = e.print();
            return if e.use_stderr() {
                DdnsExitCode::ConfigError.into()
            } else {
                DdnsExitCode::Success.into()
            };
        }
    };

    let invocation = Invocation::from(cli);
    if let Err(e) = invocation.validate() {
        eprintln!("Argument error: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    // Initialize tracing; stdout is reserved for the verdict
    let log_level = match parse_log_level(
        &env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string()),
    ) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Configuration error: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    info!(
        "Updating {}.{} from instance {} ({}/{}) as {}",
        invocation.record,
        invocation.zone,
        invocation.instance,
        invocation.project,
        invocation.datacenter,
        config.credentials.user_id
    );

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(run(&config, &invocation));
    if let Err(ref e) = result {
        error!("Update aborted: {:#}", e);
    }

    let (text, code) = verdict(&result);
    println!("{}", text);
    code.into()
}

/// Locate the instance address and upsert its record
async fn run(config: &Config, invocation: &Invocation) -> Result<UpsertOutcome> {
    let (compute, dns) = gcp_ddns_provider_google::build_providers(
        config,
        &invocation.project,
        &invocation.datacenter,
    )
    .context("Failed to build providers")?;

    let locator = InstanceLocator::new(Box::new(compute));
    let address = locator
        .locate_public_address(&invocation.instance)
        .await
        .with_context(|| format!("Failed to locate instance {}", invocation.instance))?;

    let updater = RecordUpdater::new(Box::new(dns));
    let outcome = updater
        .upsert_address_record(&invocation.zone, &invocation.record, address, invocation.ttl)
        .await
        .with_context(|| format!("Failed to update zone {}", invocation.zone))?;

    Ok(outcome)
}
