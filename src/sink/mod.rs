pub mod fluentd;
pub mod logstash;
pub mod syslog;

pub use fluentd::FluentdDriver;
pub use logstash::LogstashDriver;
pub use syslog::SyslogDriver;

use crate::emitter::Emitter;
use crate::options::OptionMap;
use crate::setup::SetupError;
use std::fmt;

/// The built-in sink kinds. Syslog is always on; the others are opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Syslog,
    Fluentd,
    Logstash,
}

impl SinkKind {
    /// The name callers use to request the sink, and the namespace prefix of
    /// its option keys.
    pub fn name(self) -> &'static str {
        match self {
            SinkKind::Syslog => "syslog",
            SinkKind::Fluentd => "fluentd",
            SinkKind::Logstash => "logstash",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Remote sink endpoint, split out of a combined `host:port` option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkTarget {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for SinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Capability implemented by each sink kind: declare the legal option keys
/// and install a configured hook onto the emitter. Adding a sink kind means
/// adding a driver to [`registry`]; the orchestrator never changes.
pub trait SinkDriver: Send + Sync {
    fn kind(&self) -> SinkKind;

    /// Full namespaced option keys this sink recognizes (its allow-list).
    fn allowed_keys(&self) -> &'static [&'static str];

    /// Derives sink settings from an already-validated scoped option map,
    /// substituting documented defaults for missing keys, and appends the
    /// resulting hook to `emitter`.
    fn install(
        &self,
        options: &OptionMap,
        tag: &str,
        emitter: &mut Emitter,
    ) -> Result<(), SetupError>;
}

/// Static table of the built-in drivers.
pub fn registry() -> &'static [&'static dyn SinkDriver] {
    static DRIVERS: [&dyn SinkDriver; 3] = [&SyslogDriver, &FluentdDriver, &LogstashDriver];
    &DRIVERS
}

/// Resolves a requested sink name against the registry.
pub fn driver_for(name: &str) -> Option<&'static dyn SinkDriver> {
    registry()
        .iter()
        .copied()
        .find(|driver| driver.kind().name() == name)
}

/// The driver for a known kind.
pub fn driver(kind: SinkKind) -> &'static dyn SinkDriver {
    match kind {
        SinkKind::Syslog => &SyslogDriver,
        SinkKind::Fluentd => &FluentdDriver,
        SinkKind::Logstash => &LogstashDriver,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_kinds() {
        let kinds: Vec<SinkKind> = registry().iter().map(|driver| driver.kind()).collect();
        assert_eq!(
            kinds,
            vec![SinkKind::Syslog, SinkKind::Fluentd, SinkKind::Logstash]
        );
    }

    #[test]
    fn test_driver_for_resolves_known_names() {
        assert_eq!(driver_for("syslog").map(|d| d.kind()), Some(SinkKind::Syslog));
        assert_eq!(driver_for("fluentd").map(|d| d.kind()), Some(SinkKind::Fluentd));
        assert_eq!(driver_for("logstash").map(|d| d.kind()), Some(SinkKind::Logstash));
        assert!(driver_for("journald").is_none());
    }

    #[test]
    fn test_allow_lists_are_namespaced_under_the_sink_name() {
        for driver in registry() {
            let prefix = format!("{}.", driver.kind().name());
            for key in driver.allowed_keys() {
                assert!(key.starts_with(&prefix), "{key} lacks prefix {prefix}");
            }
        }
    }

    #[test]
    fn test_target_display() {
        let v4 = SinkTarget {
            host: "localhost".to_string(),
            port: 24224,
        };
        assert_eq!(v4.to_string(), "localhost:24224");

        let v6 = SinkTarget {
            host: "::1".to_string(),
            port: 24224,
        };
        assert_eq!(v6.to_string(), "[::1]:24224");
    }
}
