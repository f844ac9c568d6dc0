mod cli;
mod commands;
mod format;

use std::process::ExitCode;

use clap::Parser;
use tether_common::encoding::CodecError;
use tether_common::error::ErrorCode;
use tether_config::AgentConfig;
use tether_crypto::CryptoError;
use tether_store::StoreError;

use cli::{Cli, Command};
use commands::Session;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => cli.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _guards = match init_logging(env_filter, cli.log_file.as_deref()) {
        Ok(guards) => guards,
        Err(e) => {
            eprintln!("Error: could not initialise logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = error_code(&e);
            tracing::debug!(code = ?code, "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::from(code.exit_code())
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Commands that need no configuration or data directory.
    match &cli.command {
        Command::Keygen { out } => return commands::keygen(out.as_deref(), cli.json),
        Command::Sign { key, input } => return commands::sign_payload(key, input),
        Command::Verify {
            key,
            signature,
            input,
        } => return commands::verify_payload(key, signature, input, cli.json),
        Command::Hash { input } => return commands::hash(input),
        Command::Encode { url_safe, input } => return commands::encode(input, *url_safe),
        Command::Decode { url_safe, text } => return commands::decode(text, *url_safe),
        Command::Jwk { key, kid } => return commands::jwk(key, kid.as_deref()),
        Command::Status | Command::Credentials(_) | Command::Assertion { .. } => {}
    }

    let config = match &cli.config {
        Some(path) => AgentConfig::load_from(path)?,
        None => {
            tether_config::dirs::ensure_data_dir();
            AgentConfig::load()?
        }
    };
    let session = Session {
        profile: cli.profile.unwrap_or(config.security_profile),
        credentials_path: cli
            .credentials
            .clone()
            .unwrap_or_else(|| config.resolved_credentials_path()),
        json: cli.json,
        config,
    };
    tracing::debug!(
        profile = %session.profile,
        path = %session.credentials_path.display(),
        "Configuration resolved"
    );

    match &cli.command {
        Command::Status => commands::status(&session),
        Command::Credentials(c) => commands::credentials(&session, &c.command),
        Command::Assertion {
            audience,
            tenant,
            lifetime,
        } => commands::assertion(&session, audience.as_deref(), tenant.as_deref(), *lifetime),
        _ => Ok(()),
    }
}

/// Map a command failure to the SDK error code that best describes it.
fn error_code(e: &anyhow::Error) -> ErrorCode {
    for cause in e.chain() {
        if let Some(store) = cause.downcast_ref::<StoreError>() {
            return store.into();
        }
        if let Some(crypto) = cause.downcast_ref::<CryptoError>() {
            return crypto.into();
        }
        if let Some(codec) = cause.downcast_ref::<CodecError>() {
            return codec.into();
        }
    }
    ErrorCode::Fail
}

/// Initialize tracing with non-blocking writers.
///
/// Returns guards that must be held until exit so buffered log lines are
/// flushed.
fn init_logging(
    env_filter: tracing_subscriber::EnvFilter,
    log_file: Option<&std::path::Path>,
) -> anyhow::Result<Vec<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::prelude::*;

    // Logs go to stderr; stdout carries command output.
    let (nb_stderr, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(nb_stderr);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let (nb_file, file_guard) = tracing_appender::non_blocking(file);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(nb_file);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();

        Ok(vec![stderr_guard, file_guard])
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();

        Ok(vec![stderr_guard])
    }
}
