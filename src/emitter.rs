use crate::severity::Severity;
use crate::sink::syslog::Priority;
use crate::sink::{SinkKind, SinkTarget};
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use std::net::TcpStream;

/// Environment variable consulted when choosing the timestamp style.
pub const INIT_SYSTEM_ENV: &str = "INITSYSTEM";
const SYSTEMD_MARKER: &str = "SYSTEMD";

/// How rendered record lines carry their timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampStyle {
    /// RFC 3339 timestamp prefix (default).
    #[default]
    Rfc3339,
    /// No timestamp of our own; the journal stamps records itself.
    Journal,
}

impl TimestampStyle {
    /// `INITSYSTEM=SYSTEMD` selects the journal style, anything else the
    /// RFC 3339 default.
    pub fn from_env() -> Self {
        match std::env::var(INIT_SYSTEM_ENV) {
            Ok(value) if value == SYSTEMD_MARKER => TimestampStyle::Journal,
            _ => TimestampStyle::Rfc3339,
        }
    }
}

/// How an installed hook decides whether a record concerns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityFilter {
    /// Fire on every record at or above the threshold.
    AtOrAbove(Severity),
    /// Fire only on the enumerated levels, for sinks whose delivery protocol
    /// supports per-level opt-in rather than inequality filtering.
    Exact(&'static [Severity]),
}

impl SeverityFilter {
    pub fn wants(&self, severity: Severity) -> bool {
        match self {
            SeverityFilter::AtOrAbove(threshold) => severity.at_or_above(*threshold),
            SeverityFilter::Exact(levels) => levels.contains(&severity),
        }
    }
}

/// Kind-specific data carried by an installed hook.
#[derive(Debug)]
pub enum HookBinding {
    Syslog {
        priority: Priority,
        tag: String,
    },
    Fluentd {
        target: SinkTarget,
        tag: String,
        /// Behind a mutex: concurrent submitters may share the hook, and
        /// writes to a single connection must be serialized.
        connection: Mutex<TcpStream>,
    },
}

/// An installed sink instance. Owned by the emitter once attached; never
/// removed during the process lifetime.
#[derive(Debug)]
pub struct Hook {
    filter: SeverityFilter,
    binding: HookBinding,
}

impl Hook {
    pub fn syslog(filter: SeverityFilter, priority: Priority, tag: &str) -> Self {
        Self {
            filter,
            binding: HookBinding::Syslog {
                priority,
                tag: tag.to_string(),
            },
        }
    }

    pub fn fluentd(
        filter: SeverityFilter,
        target: SinkTarget,
        tag: &str,
        connection: TcpStream,
    ) -> Self {
        Self {
            filter,
            binding: HookBinding::Fluentd {
                target,
                tag: tag.to_string(),
                connection: Mutex::new(connection),
            },
        }
    }

    pub fn kind(&self) -> SinkKind {
        match &self.binding {
            HookBinding::Syslog { .. } => SinkKind::Syslog,
            HookBinding::Fluentd { .. } => SinkKind::Fluentd,
        }
    }

    pub fn filter(&self) -> SeverityFilter {
        self.filter
    }

    pub fn tag(&self) -> &str {
        match &self.binding {
            HookBinding::Syslog { tag, .. } | HookBinding::Fluentd { tag, .. } => tag,
        }
    }

    pub fn binding(&self) -> &HookBinding {
        &self.binding
    }

    pub fn wants(&self, severity: Severity) -> bool {
        self.filter.wants(severity)
    }
}

/// Process-wide record fan-out point. Built once by
/// [`setup_logging`](crate::setup::setup_logging) and read-mostly afterwards:
/// the hook chain does not change after setup returns, so routing needs no
/// locking.
#[derive(Debug)]
pub struct Emitter {
    threshold: Severity,
    hooks: Vec<Hook>,
    style: TimestampStyle,
    console: bool,
}

impl Emitter {
    pub fn new(style: TimestampStyle) -> Self {
        Self {
            threshold: Severity::Info,
            hooks: Vec::new(),
            style,
            console: true,
        }
    }

    pub fn from_env() -> Self {
        Self::new(TimestampStyle::from_env())
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Pins the global severity threshold. Only the always-on sink does this;
    /// other sinks apply their own more-restrictive filters on top.
    pub fn set_threshold(&mut self, level: Severity) {
        self.threshold = level;
    }

    /// Disables the default console destination so records are not emitted
    /// twice once the always-on sink takes over.
    pub fn silence_console(&mut self) {
        self.console = false;
    }

    pub fn console_enabled(&self) -> bool {
        self.console
    }

    pub fn style(&self) -> TimestampStyle {
        self.style
    }

    pub fn add_hook(&mut self, hook: Hook) {
        self.hooks.push(hook);
    }

    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    /// True when a record at `severity` passes the global threshold.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity.at_or_above(self.threshold)
    }

    /// The hooks that should receive a record at `severity`. Delivering the
    /// record belongs to the sinks' transport layer, not to this subsystem.
    pub fn route(&self, severity: Severity) -> impl Iterator<Item = &Hook> {
        let pass = self.enabled(severity);
        self.hooks
            .iter()
            .filter(move |hook| pass && hook.wants(severity))
    }

    /// Renders the record text in the selected timestamp style.
    pub fn render_line(&self, severity: Severity, message: &str) -> String {
        match self.style {
            TimestampStyle::Rfc3339 => format!(
                "time={} level={severity} msg={message:?}",
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            TimestampStyle::Journal => format!("level={severity} msg={message:?}"),
        }
    }
}
