pub mod config;

pub use config::{Config, ConfigError, FileConfig, ResolvedConfig};

use crate::emitter::{Emitter, HookBinding};
use crate::setup;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Entry point for the `rask-log-fanout` binary: resolve the configuration,
/// run setup, and report what got installed. A fatal setup error (bad
/// severity, unreachable sink target) halts startup with a non-zero exit.
pub fn main() -> ExitCode {
    init_diagnostics();

    let resolved = match Config::parse().resolve() {
        Ok(resolved) => resolved,
        Err(err) => {
            error!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match setup::setup_logging(&resolved.sinks, &resolved.options, &resolved.tag) {
        Ok(emitter) => {
            report(&emitter);
            ExitCode::SUCCESS
        }
        Err(err) if err.is_fatal() => {
            error!("fatal logging setup error: {err}");
            ExitCode::from(2)
        }
        Err(err) => {
            error!("logging setup error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// The binary's own diagnostics go through tracing; the configured emitter is
/// a separate channel for the embedding process.
fn init_diagnostics() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn report(emitter: &Emitter) {
    info!(
        threshold = %emitter.threshold(),
        style = ?emitter.style(),
        console = emitter.console_enabled(),
        "logging configured"
    );
    for hook in emitter.hooks() {
        match hook.binding() {
            HookBinding::Syslog { priority, tag } => {
                info!(sink = %hook.kind(), priority = ?priority, tag, "hook installed");
            }
            HookBinding::Fluentd { target, tag, .. } => {
                info!(sink = %hook.kind(), address = %target, tag, "hook installed");
            }
        }
    }
}
