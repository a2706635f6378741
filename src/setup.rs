use crate::emitter::Emitter;
use crate::options::{OptionMap, scoped_options, validate_options};
use crate::severity::ParseSeverityError;
use crate::sink::{self, SinkDriver, SinkKind};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SetupError {
    #[error(
        "provided configuration value {key:?} is not supported as a logging option for sink {sink}"
    )]
    UnsupportedOption { sink: SinkKind, key: String },

    #[error("provided sink {name:?} is not a supported sink")]
    UnknownSink { name: String },

    #[error("sink {sink} is disabled in this build")]
    SinkDisabled { sink: SinkKind },

    #[error("invalid severity level for sink {sink}")]
    InvalidLevel {
        sink: SinkKind,
        #[source]
        source: ParseSeverityError,
    },

    #[error("sink {sink} target {address:?} is unreachable: {reason}")]
    UnreachableTarget {
        sink: SinkKind,
        address: String,
        reason: String,
    },
}

impl SetupError {
    /// Fatal errors must halt process startup: a misconfigured severity or an
    /// unreachable sink target must not let the process run with the wrong
    /// observability. The binary maps these to a non-zero exit; validation
    /// errors are returned to the caller instead.
    pub fn is_fatal(&self) -> bool {
        match self {
            SetupError::InvalidLevel { .. } | SetupError::UnreachableTarget { .. } => true,
            SetupError::UnsupportedOption { .. }
            | SetupError::UnknownSink { .. }
            | SetupError::SinkDisabled { .. } => false,
        }
    }
}

/// Builds the process-wide emitter: the always-on syslog sink first, then
/// each additionally requested sink exactly once, in the given order. The
/// first failure aborts the remainder of setup; nothing requested after it
/// is installed.
pub fn setup_logging<S: AsRef<str>>(
    sinks: &[S],
    options: &OptionMap,
    tag: &str,
) -> Result<Emitter, SetupError> {
    let mut emitter = Emitter::from_env();

    // syslog is always installed, whether requested or not.
    install_sink(sink::driver(SinkKind::Syslog), options, tag, &mut emitter)?;
    let mut installed = HashSet::from([SinkKind::Syslog]);

    for name in sinks {
        let name = name.as_ref();
        let Some(driver) = sink::driver_for(name) else {
            return Err(SetupError::UnknownSink {
                name: name.to_string(),
            });
        };
        // Requesting an already-installed sink again (syslog included) is
        // not an error; each kind installs at most once per call.
        if !installed.insert(driver.kind()) {
            debug!(sink = %driver.kind(), "sink already installed, skipping");
            continue;
        }
        install_sink(driver, options, tag, &mut emitter)?;
    }

    info!(
        hooks = emitter.hooks().len(),
        threshold = %emitter.threshold(),
        "logging setup complete"
    );
    Ok(emitter)
}

fn install_sink(
    driver: &dyn SinkDriver,
    options: &OptionMap,
    tag: &str,
    emitter: &mut Emitter,
) -> Result<(), SetupError> {
    let kind = driver.kind();
    let scoped = scoped_options(kind.name(), options);
    validate_options(kind, &scoped, driver.allowed_keys())?;
    driver.install(&scoped, tag, emitter)
}
